use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{load_file, member_details, total_commission, ApplicationError, ToTermTree};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{ForestBuilder, MemberTree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file }) => _tree(file.as_deref()),
        Some(Commands::Report { file }) => _report(file.as_deref()),
        Some(Commands::Total { id, file }) => _total(id, file.as_deref()),
        Some(Commands::Info { id, file }) => _info(id, file.as_deref()),
        Some(Commands::Roots { file }) => _roots(file.as_deref()),
        Some(Commands::Leaves { file }) => _leaves(file.as_deref()),
        Some(Commands::Sample { path }) => _sample(path.as_deref()),
        None => Ok(()),
    }
}

/// Resolve the data file: explicit argument wins over configured default.
fn resolve_data_file(file: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = file {
        return Ok(path.to_path_buf());
    }
    let settings = Settings::load()?;
    settings.data_file.ok_or_else(|| {
        CliError::Usage("no data file given and none configured (set KICKTREE_DATA_FILE)".into())
    })
}

fn load_forest(file: Option<&Path>) -> CliResult<Vec<MemberTree>> {
    let path = resolve_data_file(file)?;
    debug!("loading member data from {:?}", path);
    let (members, edges) = load_file(&path)?;
    let forest = ForestBuilder::new()
        .build(members, &edges)
        .map_err(ApplicationError::from)?;
    Ok(forest)
}

#[instrument]
fn _tree(file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    for tree in &forest {
        print!("{}", tree.to_tree_string());
    }
    Ok(())
}

#[instrument]
fn _report(file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    for tree in &forest {
        for line in tree.commission_lines() {
            output::info(&line);
        }
    }
    Ok(())
}

#[instrument]
fn _total(id: &str, file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    let total = total_commission(&forest, id)?;
    output::info(&format!("{:.2}", total));
    Ok(())
}

#[instrument]
fn _info(id: &str, file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    let details = member_details(&forest, id)?;

    output::header(&format!("Member: {}", details.name));
    output::detail(&format!("id:                {}", details.id));
    output::detail(&format!("direct commission: {:.2}", details.direct_commission));
    output::detail(&format!("kickback rate:     {}%", details.kickback_percent));
    output::detail(&format!("total commission:  {:.2}", details.total_commission));

    if !details.children.is_empty() {
        output::header("Children");
        for child in &details.children {
            output::detail(&format!(
                "{}  {}  {:.2}",
                child.id, child.name, child.direct_commission
            ));
        }
    }
    Ok(())
}

#[instrument]
fn _roots(file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    for tree in &forest {
        if let Some(root_idx) = tree.root() {
            // root() is always live for a built tree
            let node = tree.get_node(root_idx).unwrap();
            output::info(&format!(
                "{}  {}  ({:.2})",
                node.member.id,
                node.member.name,
                tree.total_commission(root_idx)
            ));
        }
    }
    Ok(())
}

#[instrument]
fn _leaves(file: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(file)?;
    let leaves = forest
        .iter()
        .flat_map(|tree| tree.leaf_members())
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect::<Vec<_>>();
    for member in leaves {
        output::info(&format!("{}  {}", member.id, member.name));
    }
    Ok(())
}

#[instrument]
fn _sample(path: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load()?;
    let content = sample_document(settings.default_kickback_rate);
    match path {
        Some(path) => {
            fs::write(path, content).map_err(|e| CliError::Write(path.to_path_buf(), e))?;
            output::action("written", &path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Demo dataset: two referral chains plus a branching downline,
/// uuid member ids.
fn sample_document(kickback_rate: f64) -> String {
    let seed: &[(&str, f64)] = &[
        ("Alice", 100.0),
        ("Bob", 25.0),
        ("Carol", 10.0),
        ("Dave", 5.0),
        ("Frank", 2.0),
        ("Grace", 3.0),
        ("George", 30.0),
        ("Henry", 8.0),
        ("Isabel", 15.0),
    ];
    let ids: Vec<String> = seed.iter().map(|_| Uuid::new_v4().to_string()).collect();

    let mut doc = String::new();
    for ((name, direct), id) in seed.iter().zip(&ids) {
        let _ = writeln!(doc, "[[member]]");
        let _ = writeln!(doc, "id = \"{}\"", id);
        let _ = writeln!(doc, "name = \"{}\"", name);
        let _ = writeln!(doc, "direct_commission = {:.1}", direct);
        let _ = writeln!(doc, "kickback_rate = {}", kickback_rate);
        let _ = writeln!(doc);
    }

    // Alice -> Bob -> Carol -> {Dave, Frank, Grace}; George -> {Henry, Isabel}
    let edges = [(0, 1), (1, 2), (2, 3), (2, 4), (2, 5), (6, 7), (6, 8)];
    for (parent, child) in edges {
        let _ = writeln!(doc, "[[edge]]");
        let _ = writeln!(doc, "parent = \"{}\"", ids[parent]);
        let _ = writeln!(doc, "child = \"{}\"", ids[child]);
        let _ = writeln!(doc);
    }

    doc
}

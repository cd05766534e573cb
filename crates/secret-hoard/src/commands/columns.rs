//! Columns command

use anyhow::Result;
use hoard_core::{ColumnLayouts, SecretKind};

use crate::cli::{ColumnsArgs, GlobalOptions};
use crate::commands::load_config;
use crate::output;

pub fn run(args: &ColumnsArgs, global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;

    let kinds = match args.kind.as_deref() {
        Some(kind) => vec![kind.parse::<SecretKind>()?],
        None => SecretKind::ALL.to_vec(),
    };

    for kind in kinds {
        print_layout(kind, config.columns());
    }
    Ok(())
}

fn print_layout(kind: SecretKind, layouts: &ColumnLayouts) {
    let columns = layouts.layout(kind);
    output::header(kind.prefix());
    output::kv("columns", &columns.join(","));
    if columns == kind.default_columns().as_slice() {
        output::kv("example", kind.example_row());
    }
}

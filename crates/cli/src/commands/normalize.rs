//! `tanawal normalize <entity> <file>`: run a saved payload through the
//! normalizers without any network access.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde_json::Value;

use tanawal_core::normalize::normalize_collection;
use tanawal_core::{Delivery, Food, Purchase, User};

use super::{CliError, Output};

#[derive(Clone, Copy, ValueEnum)]
pub enum EntityKind {
    Food,
    User,
    Order,
    Delivery,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Which normalizer to apply
    entity: EntityKind,

    /// JSON payload as returned by the API
    file: PathBuf,
}

pub fn run(args: &NormalizeArgs, out: Output) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.file).map_err(|source| CliError::Io {
        path: args.file.display().to_string(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&text)?;
    match args.entity {
        EntityKind::Food => out.records(&refs(&normalize_collection::<Food>(&payload))),
        EntityKind::User => out.records(&refs(&normalize_collection::<User>(&payload))),
        EntityKind::Order => out.records(&refs(&normalize_collection::<Purchase>(&payload))),
        EntityKind::Delivery => out.records(&refs(&normalize_collection::<Delivery>(&payload))),
    }
}

fn refs<E>(records: &[E]) -> Vec<&E> {
    records.iter().collect()
}

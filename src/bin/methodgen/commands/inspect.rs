//! `methodgen inspect` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InspectArgs;
use methodgen::ops::{entries, format_entries, inspect, InspectOptions};
use methodgen::util::fs::expand_inputs;

pub fn execute(args: InspectArgs, config: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config)?;

    let opts = InspectOptions {
        inputs: expand_inputs(&args.inputs)?,
        dialect: config.dialect,
    };
    let lists = inspect(&opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
    } else {
        print!("{}", format_entries(&entries(&lists)));
    }

    Ok(())
}

use std::{io::Write, path::Path};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use got::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty got repository")
        .arg(
            Arg::with_name("directory")
                .required(true)
                .help("The directory to create"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let dir = init_matches
        .value_of_os("directory")
        .ok_or("missing directory argument")?;

    Repository::init(Path::new(dir))?;

    writeln!(app, ".got repo initialized")?;

    Ok(())
}

#[macro_use]
extern crate clap;

use coset::utils::{construct, init_logging};
use coset::Limits;
use presentation::Word;

use anyhow::Context;
use clap::App;
use itertools::Itertools;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    init_logging();

    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let mut limits = Limits::unlimited();
    if matches.is_present("max_definitions") {
        limits.max_definitions = Some(value_t!(matches, "max_definitions", usize)?);
    }
    if matches.is_present("max_classes") {
        limits.max_classes = Some(value_t!(matches, "max_classes", usize)?);
    }
    if matches.is_present("timeout") {
        let seconds = value_t!(matches, "timeout", f64)?;
        limits.timeout =
            Some(Duration::try_from_secs_f64(seconds).context("Invalid timeout")?);
    }

    let mut tc = construct(
        matches.value_of("generators").unwrap_or_default(),
        matches.value_of("relators").unwrap_or_default(),
        matches.value_of("subgroup").unwrap_or_default(),
        limits,
    )?;
    let table = tc.run()?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Index: {}", table.index());
    print!("{table}");

    if matches.is_present("permutations") {
        for (g, permutation) in table.permutations() {
            println!("{g}: [{}]", permutation.iter().join(", "));
        }
    }

    for word in matches.values_of("rewrite").into_iter().flatten() {
        let parsed: Word = word.parse()?;
        match table.rewrite(&parsed) {
            Some(rep) => println!("{parsed} -> {rep}"),
            None => anyhow::bail!("{parsed} uses a letter that is not a generator"),
        }
    }

    Ok(())
}

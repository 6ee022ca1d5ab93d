/*!
Replays a reference file through the simulated mmu.

# Usage:
```bash
cargo run --release -- BACKING_STORE.bin addresses.txt
```

With a custom configuration and verbose logging:
```bash
cargo run --release -- -vvv -c mmusim.toml --page-table-entries 64 -o run.csv BACKING_STORE.bin addresses.txt
```
*/
mod config;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::*;
use log::{info, Level};

use mmusim::io::{RecordWriter, ReferenceStream};
use mmusim::mem::{BackingStore, FileIoBackingStore, Translator};
use mmusim::prelude::v1::{Error, ErrorKind, ErrorOrigin, Result};

use config::{Config, Overrides};

fn main() -> Result<()> {
    let matches = parse_args();
    let (backing_store, addresses, cfg) = extract_args(&matches)?;

    let store = FileIoBackingStore::open(&backing_store)?;
    let mut translator = Translator::builder(store).config(cfg.sim).build()?;
    let mut writer = RecordWriter::create(cfg.output())?;

    info!(
        "translating {} against {} (tlb={}, page table={}, frames={})",
        addresses.display(),
        backing_store.display(),
        cfg.sim.tlb_entries,
        cfg.sim.page_table_entries,
        cfg.sim.frame_budget
    );

    run(
        &mut translator,
        ReferenceStream::open(&addresses)?,
        &mut writer,
    )?;

    info!(
        "wrote {} records to {}",
        writer.written(),
        cfg.output().display()
    );
    if translator.frames().is_overcommitted() {
        info!(
            "{} distinct pages were referenced with a budget of {} frames",
            translator.frames().assigned(),
            translator.frames().budget()
        );
    }

    println!("{}", translator.stats());

    Ok(())
}

/// Translates every reference of `stream` and writes one record per reference.
fn run<B: BackingStore, R: BufRead, W: Write>(
    translator: &mut Translator<B>,
    stream: ReferenceStream<R>,
    writer: &mut RecordWriter<W>,
) -> Result<()> {
    for addr in stream {
        let record = translator.translate(addr?)?;
        writer.write(&record)?;
    }
    writer.flush()
}

fn parse_args() -> ArgMatches {
    Command::new("mmusim")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(Arg::new("verbose").short('v').action(ArgAction::Count))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            Arg::new("tlb-entries")
                .long("tlb-entries")
                .action(ArgAction::Set)
                .value_parser(value_parser!(usize))
                .required(false),
        )
        .arg(
            Arg::new("page-table-entries")
                .long("page-table-entries")
                .action(ArgAction::Set)
                .value_parser(value_parser!(usize))
                .required(false),
        )
        .arg(
            Arg::new("frame-budget")
                .long("frame-budget")
                .action(ArgAction::Set)
                .value_parser(value_parser!(usize))
                .required(false),
        )
        .arg(
            Arg::new("backing-store")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("addresses")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .get_matches()
}

fn extract_args(matches: &ArgMatches) -> Result<(PathBuf, PathBuf, Config)> {
    let log_level = match matches.get_count("verbose") {
        0 => Level::Error,
        1 => Level::Warn,
        2 => Level::Info,
        3 => Level::Debug,
        4 => Level::Trace,
        _ => Level::Trace,
    };
    simplelog::TermLogger::init(
        log_level.to_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|err| Error(ErrorOrigin::Other, ErrorKind::Unknown).log_error(err))?;

    let cfg = match matches.get_one::<PathBuf>("config") {
        Some(path) => config::try_parse(path)?,
        None => Config::default(),
    };
    let cfg = cfg.with_overrides(Overrides {
        tlb_entries: matches.get_one::<usize>("tlb-entries").copied(),
        page_table_entries: matches.get_one::<usize>("page-table-entries").copied(),
        frame_budget: matches.get_one::<usize>("frame-budget").copied(),
        output: matches.get_one::<PathBuf>("output").cloned(),
    });

    // both are required, clap exits before we get here if either is missing
    let backing_store = matches
        .get_one::<PathBuf>("backing-store")
        .cloned()
        .unwrap_or_default();
    let addresses = matches
        .get_one::<PathBuf>("addresses")
        .cloned()
        .unwrap_or_default();

    Ok((backing_store, addresses, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    use mmusim::dummy::DummyBackingStore;

    fn output(records: &str, pages: usize) -> (String, Result<()>) {
        let mut translator = Translator::builder(DummyBackingStore::with_pages(pages))
            .build()
            .unwrap();
        let mut writer = RecordWriter::new(vec![]);
        let res = run(
            &mut translator,
            ReferenceStream::new(records.as_bytes()),
            &mut writer,
        );
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        (out, res)
    }

    #[test]
    fn test_run_writes_csv() {
        // 513 = page 2 offset 1, 2 = page 0 offset 2
        let (out, res) = output("513\n2\n514\n", 256);
        assert_eq!(res, Ok(()));
        assert_eq!(out, "513,1,3\n2,258,2\n514,2,0\n");
    }

    #[test]
    fn test_run_stops_on_bad_reference() {
        let (out, res) = output("1\nfoo\n2\n", 256);
        assert_eq!(
            res,
            Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::Encoding))
        );
        assert_eq!(out, "1,1,1\n");
    }

    #[test]
    fn test_run_stops_on_short_backing_store() {
        let (out, res) = output("1\n256\n", 1);
        assert_eq!(
            res,
            Err(Error(ErrorOrigin::BackingStore, ErrorKind::OutOfBounds))
        );
        assert_eq!(out, "1,1,1\n");
    }
}

//! CLI utility to list drumkits and package one as a `.h2drumkit` archive.

use std::path::PathBuf;

use kitshelf::config;
use kitshelf::drumkit::{DrumkitStore, FsDrumkitStore, KitCatalog, KitOrigin};
use kitshelf::export::{ArchiveBackend, ExportJob};
use kitshelf::logging;
use serde::Serialize;

fn main() {
    if let Err(err) = logging::init_cli() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(command) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let roots = settings.kit_roots().map_err(|err| err.to_string())?;
    let store = FsDrumkitStore::new(roots.user());

    match command {
        Command::List { json } => {
            let catalog = KitCatalog::load(&store, &roots, None);
            let rows: Vec<KitListing> = catalog
                .entries()
                .iter()
                .map(|entry| KitListing {
                    name: entry.kit.name.clone(),
                    origin: origin_name(entry.origin),
                    path: entry.kit.path.clone(),
                })
                .collect();
            if json {
                let text = serde_json::to_string_pretty(&rows)
                    .map_err(|err| format!("Failed to encode listing: {err}"))?;
                println!("{text}");
            } else {
                for row in rows {
                    println!("{}\t{}\t{}", row.origin, row.name, row.path.display());
                }
            }
        }
        Command::Export { kit, out, backend } => {
            let dir = roots
                .locate(&kit)
                .ok_or_else(|| format!("Drumkit not found: {kit}"))?;
            let drumkit = store.load(&dir).map_err(|err| err.to_string())?;
            let backend = backend.unwrap_or(settings.archive_backend);
            let report = ExportJob::new(&dir, &drumkit.name, out)
                .run(backend)
                .map_err(|err| err.to_string())?;
            println!(
                "Exported {} file(s) to {}",
                report.entries,
                report.archive_path.display()
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct KitListing {
    name: String,
    origin: &'static str,
    path: PathBuf,
}

fn origin_name(origin: KitOrigin) -> &'static str {
    match origin {
        KitOrigin::System => "system",
        KitOrigin::User => "user",
    }
}

enum Command {
    List {
        json: bool,
    },
    Export {
        kit: String,
        out: PathBuf,
        backend: Option<ArchiveBackend>,
    },
}

#[derive(Default)]
struct Options {
    list: bool,
    json: bool,
    kit: Option<String>,
    out: Option<PathBuf>,
    backend: Option<ArchiveBackend>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Command>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--list" => options.list = true,
            "--json" => options.json = true,
            "--kit" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--kit requires a value".to_string())?;
                options.kit = Some(value.to_string());
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                options.out = Some(PathBuf::from(value));
            }
            "--backend" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--backend requires a value".to_string())?;
                let backend = ArchiveBackend::from_label(value)
                    .ok_or_else(|| format!("Unknown backend: {value}"))?;
                options.backend = Some(backend);
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }

    if options.list {
        return Ok(Some(Command::List { json: options.json }));
    }
    let kit = options.kit.ok_or_else(|| "--kit is required".to_string())?;
    let out = options.out.ok_or_else(|| "--out is required".to_string())?;
    Ok(Some(Command::Export {
        kit,
        out,
        backend: options.backend,
    }))
}

fn help_text() -> String {
    [
        "kitshelf-export",
        "",
        "Lists drumkits or packages one as a .h2drumkit archive.",
        "",
        "Usage:",
        "  kitshelf-export --kit <name> --out <dir> [--backend native|tar]",
        "  kitshelf-export --list [--json]",
        "",
        "Options:",
        "  --kit <name>       Drumkit to export (user kits win over system kits).",
        "  --out <dir>        Destination folder for <name>.h2drumkit.",
        "  --backend <name>   native, tar or unsupported (defaults to config).",
        "  --list             Print every drumkit with its origin and folder.",
        "  --json             Print the listing as JSON.",
    ]
    .join("\n")
}

use std::fs;
use std::path::PathBuf;

use mathviz_charts::ChartId;
use mathviz_charts::telemetry::init_default_tracing;

#[derive(Debug)]
struct CliArgs {
    only_chart: Option<ChartId>,
    out_dir: Option<PathBuf>,
    compact: bool,
    list: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    if args.list {
        for chart in ChartId::ALL {
            println!("{chart}");
        }
        return Ok(());
    }

    let charts: Vec<ChartId> = match args.only_chart {
        Some(chart) => vec![chart],
        None => ChartId::ALL.to_vec(),
    };

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create `{}`: {err}", dir.display()))?;
    }

    for chart in charts {
        let contract = chart.export_contract_v1();
        contract
            .descriptor
            .validate()
            .map_err(|err| format!("chart `{chart}` produced an invalid descriptor: {err}"))?;
        let serialized = if args.compact {
            contract.to_json_compact()
        } else {
            contract.to_json_pretty()
        }
        .map_err(|err| err.to_string())?;

        match &args.out_dir {
            Some(dir) => {
                let path = dir.join(format!("{chart}.json"));
                fs::write(&path, format!("{serialized}\n"))
                    .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
                println!("wrote {}", path.display());
            }
            None => println!("{serialized}"),
        }
    }

    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut only_chart: Option<ChartId> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut compact = false;
    let mut list = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chart" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --chart".to_owned())?;
                only_chart = Some(value.parse::<ChartId>().map_err(|err| err.to_string())?);
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                out_dir = Some(PathBuf::from(value));
            }
            "--compact" => compact = true,
            "--list" => list = true,
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin export_chart_descriptors -- [--chart <id>] [--out <dir>] [--compact] [--list]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    Ok(CliArgs {
        only_chart,
        out_dir,
        compact,
        list,
    })
}

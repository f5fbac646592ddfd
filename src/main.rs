use std::path::PathBuf;

use tradeview::{run_tradeview, TradeViewConfig, ViewerSettings};

const USAGE: &str = "usage: tradeview [--config PATH] [FILE]";

struct Args {
    config: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        file: None,
    };
    let mut it = std::env::args_os().skip(1);
    while let Some(arg) = it.next() {
        let text = arg.to_str().map(str::to_owned);
        match text.as_deref() {
            Some("-h") | Some("--help") => return Err(USAGE.to_string()),
            Some("--config") => {
                let path = it
                    .next()
                    .ok_or_else(|| format!("--config needs a path\n{}", USAGE))?;
                args.config = Some(PathBuf::from(path));
            }
            Some(s) if s.starts_with("--") => {
                return Err(format!("unknown option {}\n{}", s, USAGE));
            }
            _ if args.file.is_none() => args.file = Some(PathBuf::from(arg)),
            _ => return Err(format!("only one file can be opened\n{}", USAGE)),
        }
    }
    Ok(args)
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let cfg = TradeViewConfig {
        initial_file: args.file,
        settings: ViewerSettings::load_or_default(args.config.as_deref()),
        ..TradeViewConfig::default()
    };
    run_tradeview(cfg)
}

use std::env;
use std::process;

use getopts::Options;
use log::{error, LevelFilter};

use ipowner::batch::{self, Target};
use ipowner::{Config, HttpSources, LookupError};


fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} <target> [-csv]\n\n\
                         <target> is an IP address or a file with one address per line", program);
    print!("{}", opts.usage(&brief));
}

fn run(target: &str, save: bool) -> Result<(), LookupError> {
    let target = Target::classify(target)?;
    let addresses = target.addresses()?;
    let sources = HttpSources::new(Config::from_env()?)?;

    let output = batch::run(&sources, &addresses, |report| print!("{}", report));

    if save {
        let path = batch::save_csv(&env::current_dir()?, &output.csv)?;
        println!("[+] Output saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();

    println!("Search IP Owner v{}\nn3rdh4x0r\n{}\n", env!("CARGO_PKG_VERSION"), "-".repeat(57));

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "ipowner".to_string());
    let args: Vec<String> = args.collect();

    let mut opts = Options::new();
    opts.long_only(true);
    opts.optflag("", "csv", "save output to a CSV file in the current directory");
    opts.optflag("h", "help", "print this help menu");
    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("{}", f);
            print_usage(&program, &opts);
            process::exit(2);
        }
    };
    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return;
    }
    let target = match matches.free.first() {
        Some(target) => target,
        None => {
            print_usage(&program, &opts);
            process::exit(2);
        }
    };

    if let Err(err) = run(target, matches.opt_present("csv")) {
        match err {
            LookupError::Directory(_) => println!("[-] {}", err),
            _ => error!("{}", err),
        }
        process::exit(1);
    }
}

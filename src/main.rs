use log::{info, warn};
use netroute::{Config, ConfigError, RouteReader};
use std::{env, io::ErrorKind, process};

fn main() {
    env_logger::init();

    // netroute [--echo] [config.toml]
    let mut echo = false;
    let mut filename = String::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--echo" => echo = true,
            _ => filename = arg,
        }
    }

    let config = match Config::parse(&filename) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if filename.is_empty() && e.kind() == ErrorKind::NotFound => {
            info!("no config.toml found, using defaults");
            Config::default()
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let reader = match RouteReader::open(&config.path) {
        Ok(reader) => reader
            .with_layout(config.layout)
            .with_policy(config.policy()),
        Err(e) => {
            eprintln!("error in opening {}: {}", config.path.display(), e);
            process::exit(2);
        }
    };

    let mut count = 0;
    for route in reader {
        match route {
            Ok(route) => {
                count += 1;
                if echo {
                    print!("{}", config.layout.render(count, &route));
                } else {
                    println!("{}", route);
                }
            }
            Err(e) => {
                warn!("stopped after {} routes", count);
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    info!("read {} routes from {}", count, config.path.display());
}

//! `todo-web` command line: run the server or check its configuration

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::SocketAddr;
use std::path::PathBuf;
use todo_web::{server, AppConfig};

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help("Path to a TOML configuration file")
}

fn cli() -> Command {
    Command::new("todo-web")
        .version(todo_web::VERSION)
        .about("Session-backed todo lists web application")
        .arg_required_else_help(false)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP server (default)")
                .arg(config_arg())
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .short('b')
                        .value_parser(value_parser!(SocketAddr))
                        .help("Address to listen on, overrides configuration"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Validate configuration and print it with secrets masked")
                .arg(config_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn load_config(args: Option<&ArgMatches>) -> anyhow::Result<AppConfig> {
    let path = args.and_then(|args| args.get_one::<PathBuf>("config"));
    let config = AppConfig::load(path.map(PathBuf::as_path)).with_context(|| match path {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "loading configuration from environment".to_string(),
    })?;

    let bind = args
        .and_then(|args| args.try_get_one::<SocketAddr>("bind").ok().flatten())
        .copied();
    Ok(match bind {
        Some(bind) => config.with_bind(bind),
        None => config,
    })
}

/// Resolved configuration, secret masked, as TOML or JSON
fn check_config(args: &ArgMatches) -> anyhow::Result<String> {
    let config = load_config(Some(args))?.redacted();
    if args.get_flag("json") {
        Ok(format!("{}\n", serde_json::to_string_pretty(&config)?))
    } else {
        Ok(toml::to_string_pretty(&config)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("check-config", args)) => print!("{}", check_config(args)?),
        Some(("serve", args)) => {
            let config = load_config(Some(args))?;
            server::serve(config).await.context("server failed")?;
        }
        _ => {
            let config = load_config(None)?;
            server::serve(config).await.context("server failed")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bind = \"127.0.0.1:8123\"\n\n[session]\nsecret = \"hunter2\"\nttl_secs = 90\n")
            .unwrap();
        file
    }

    fn check_config_output(extra: &[&str]) -> String {
        let file = config_file();
        let path = file.path().to_str().unwrap().to_string();
        let mut argv = vec!["todo-web", "check-config", "--config", path.as_str()];
        argv.extend_from_slice(extra);

        let matches = cli().try_get_matches_from(argv).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        check_config(args).unwrap()
    }

    #[test]
    fn cli_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn serve_accepts_bind_override() {
        let matches = cli()
            .try_get_matches_from(["todo-web", "serve", "--bind", "127.0.0.1:9999"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "serve");
        assert_eq!(
            args.get_one::<SocketAddr>("bind").copied(),
            Some(SocketAddr::from(([127, 0, 0, 1], 9999)))
        );
    }

    #[test]
    fn check_config_prints_redacted_toml() {
        let output = check_config_output(&[]);
        let parsed: AppConfig = toml::from_str(&output).unwrap();
        assert_eq!(parsed.bind.port(), 8123);
        assert_eq!(parsed.session.ttl_secs, 90);
        assert_eq!(parsed.session.secret.as_deref(), Some("<redacted>"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn check_config_prints_json() {
        let output = check_config_output(&["--json"]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["bind"], "127.0.0.1:8123");
        assert_eq!(parsed["session"]["secret"], "<redacted>");
        assert_eq!(parsed["log"]["format"], "text");
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn check_config_reports_missing_file() {
        let matches = cli()
            .try_get_matches_from(["todo-web", "check-config", "--config", "/nonexistent/todo.toml"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let err = check_config(args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/todo.toml"));
    }
}

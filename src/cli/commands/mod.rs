mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("gatehouse")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("GATEHOUSE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .help("Directory containing the static site to serve")
                .env("GATEHOUSE_ROOT")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("pin")
                .long("pin")
                .help("Shared PIN required to unlock the site")
                .env("GATEHOUSE_PIN")
                .hide_env_values(true)
                .required(true),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "gatehouse");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port_root_and_pin() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "gatehouse",
            "--port",
            "8080",
            "--root",
            "/var/www/site",
            "--pin",
            "123456",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches.get_one::<std::path::PathBuf>("root").cloned(),
            Some(std::path::PathBuf::from("/var/www/site"))
        );
        assert_eq!(
            matches.get_one::<String>("pin").cloned(),
            Some("123456".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GATEHOUSE_PORT", Some("443")),
                ("GATEHOUSE_ROOT", Some("/var/www/site")),
                ("GATEHOUSE_PIN", Some("hunter2")),
                ("GATEHOUSE_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["gatehouse"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<std::path::PathBuf>("root").cloned(),
                    Some(std::path::PathBuf::from("/var/www/site"))
                );
                assert_eq!(
                    matches.get_one::<String>("pin").cloned(),
                    Some("hunter2".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("GATEHOUSE_LOG_LEVEL", Some(level)),
                    ("GATEHOUSE_ROOT", Some("/var/www/site")),
                    ("GATEHOUSE_PIN", Some("hunter2")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["gatehouse"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("GATEHOUSE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "gatehouse".to_string(),
                    "--root".to_string(),
                    "/var/www/site".to_string(),
                    "--pin".to_string(),
                    "hunter2".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_missing_required_args() {
        temp_env::with_vars(
            [
                ("GATEHOUSE_ROOT", None::<String>),
                ("GATEHOUSE_PIN", None),
            ],
            || {
                let command = new();
                let result = command.try_get_matches_from(vec!["gatehouse", "--port", "8080"]);
                assert_eq!(
                    result.map(|_| ()).map_err(|e| e.kind()),
                    Err(clap::error::ErrorKind::MissingRequiredArgument)
                );
            },
        );
    }
}

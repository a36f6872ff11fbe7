//! Command-line runner: drives the dashboard services against file-backed
//! host adapters.

use std::sync::Arc;

use anyhow::Context;

use crate::application::services::{DashboardService, TacticalOptionsService};
use crate::application::ServiceError;
use crate::infrastructure::{FileChat, JsonFileHost, SystemClock};
use crate::ports::outbound::ClockPort;
use crate::state::HostRuntime;

/// Configuration types for the player runner.
pub mod config {
    use std::path::PathBuf;
    use std::str::FromStr;

    use tianfa_domain::GameMode;
    use tianfa_shared::OptionKey;

    pub const DEFAULT_VARIABLES_FILE: &str = "variables.json";

    /// One runner invocation.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Command {
        Show,
        DeleteTitle(usize),
        DeleteItem(usize),
        DeleteVillain(String),
        EnableMode(GameMode),
        Modes,
        Options,
        Choose(OptionKey),
    }

    impl Command {
        pub const USAGE: &'static str = concat!(
            "usage: tianfa-player <show | delete-title <index> | delete-item <index> | ",
            "delete-villain <id> | enable-mode <mode> | modes | options | choose <A-D>>"
        );

        /// Parse the arguments after the program name.
        pub fn from_args<I, S>(args: I) -> Result<Self, String>
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
            let name = args.first().map(String::as_str).unwrap_or("show");
            let arg = args.get(1).map(String::as_str);

            let missing = |what: &str| format!("{} requires {}\n{}", name, what, Self::USAGE);

            match name {
                "show" => Ok(Command::Show),
                "delete-title" => {
                    parse_index(arg.ok_or_else(|| missing("an index"))?).map(Command::DeleteTitle)
                }
                "delete-item" => {
                    parse_index(arg.ok_or_else(|| missing("an index"))?).map(Command::DeleteItem)
                }
                "delete-villain" => arg
                    .map(|id| Command::DeleteVillain(id.to_string()))
                    .ok_or_else(|| missing("an id")),
                "enable-mode" => arg
                    .ok_or_else(|| missing("a mode"))?
                    .parse::<GameMode>()
                    .map(Command::EnableMode)
                    .map_err(|e| e.to_string()),
                "modes" => Ok(Command::Modes),
                "options" => Ok(Command::Options),
                "choose" => arg
                    .ok_or_else(|| missing("a letter"))?
                    .parse::<OptionKey>()
                    .map(Command::Choose),
                other => Err(format!("unknown command: {other}\n{}", Self::USAGE)),
            }
        }
    }

    fn parse_index(s: &str) -> Result<usize, String> {
        s.trim()
            .parse()
            .map_err(|_| format!("invalid index: {s}"))
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct RunnerConfig {
        pub variables_file: PathBuf,
        pub message_id: Option<i64>,
        pub message_file: Option<PathBuf>,
        pub input_file: Option<PathBuf>,
    }

    impl Default for RunnerConfig {
        fn default() -> Self {
            Self {
                variables_file: PathBuf::from(DEFAULT_VARIABLES_FILE),
                message_id: None,
                message_file: None,
                input_file: None,
            }
        }
    }

    impl RunnerConfig {
        pub fn from_env() -> Result<Self, String> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Build from any key lookup. Blank values count as unset.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
            let get = |key: &str| {
                lookup(key)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            };

            let message_id = get("TIANFA_MESSAGE_ID")
                .map(|raw| {
                    i64::from_str(&raw)
                        .map_err(|_| format!("TIANFA_MESSAGE_ID is not an integer: {raw}"))
                })
                .transpose()?;

            Ok(Self {
                variables_file: get("TIANFA_VARIABLES_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_VARIABLES_FILE)),
                message_id,
                message_file: get("TIANFA_MESSAGE_FILE").map(PathBuf::from),
                input_file: get("TIANFA_INPUT_FILE").map(PathBuf::from),
            })
        }
    }
}

use config::{Command, RunnerConfig};

pub struct RunnerDeps {
    pub runtime: HostRuntime,
    pub clock: Arc<dyn ClockPort>,
}

impl RunnerDeps {
    /// File-backed host adapters and the system clock.
    pub fn from_config(config: &RunnerConfig) -> Self {
        let mut runtime = HostRuntime::new().with_variables(Arc::new(
            JsonFileHost::new(&config.variables_file).with_message_id(config.message_id),
        ));
        if let Some(message_file) = &config.message_file {
            runtime = runtime.with_chat(Arc::new(FileChat::new(
                message_file,
                config.input_file.clone(),
            )));
        }
        Self {
            runtime,
            clock: Arc::new(SystemClock::new()),
        }
    }
}

/// Run one command and return the text to print.
///
/// Mutating commands go through the request/confirm flow and report the
/// final notice.
pub fn run(deps: RunnerDeps, command: Command) -> anyhow::Result<String> {
    let RunnerDeps { runtime, clock } = deps;

    match command {
        Command::Options => Ok(TacticalOptionsService::new(runtime)
            .current_options()
            .iter()
            .map(|(key, text)| format!("{key}. {text}"))
            .collect::<Vec<_>>()
            .join("\n")),
        Command::Choose(key) => {
            let filled = TacticalOptionsService::new(runtime)
                .choose(key)
                .with_context(|| format!("choosing option {key}"))?;
            Ok(if filled {
                format!("已填入选项 {key}")
            } else {
                format!("选项 {key} 未填入")
            })
        }
        Command::Show => with_dashboard(runtime, clock, |dashboard| {
            serde_json::to_string_pretty(&dashboard.snapshot()).context("serializing dashboard")
        }),
        Command::Modes => with_dashboard(runtime, clock, |dashboard| {
            Ok(dashboard
                .modes()
                .flags()
                .into_iter()
                .map(|(mode, on)| {
                    let mark = if on { 'x' } else { ' ' };
                    format!("[{mark}] {mode}: {}", mode.description())
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }),
        Command::DeleteTitle(index) => with_dashboard(runtime, clock, |dashboard| {
            dashboard.request_delete_title(index);
            confirmed(dashboard.confirm_delete())
        }),
        Command::DeleteItem(index) => with_dashboard(runtime, clock, |dashboard| {
            dashboard.request_delete_item(index);
            confirmed(dashboard.confirm_delete())
        }),
        Command::DeleteVillain(id) => with_dashboard(runtime, clock, |dashboard| {
            dashboard.request_delete_villain(&id);
            confirmed(dashboard.confirm_delete())
        }),
        Command::EnableMode(mode) => with_dashboard(runtime, clock, |dashboard| {
            let requested = dashboard.request_mode(mode);
            if dashboard.pending().is_some() {
                confirmed(dashboard.confirm_mode())
            } else {
                Ok(requested)
            }
        }),
    }
}

fn with_dashboard<F>(
    runtime: HostRuntime,
    clock: Arc<dyn ClockPort>,
    f: F,
) -> anyhow::Result<String>
where
    F: FnOnce(&DashboardService) -> anyhow::Result<String>,
{
    let dashboard = DashboardService::new(runtime, clock);
    dashboard.mount();
    let output = f(&dashboard);
    dashboard.unmount();
    output
}

fn confirmed(result: Result<String, ServiceError>) -> anyhow::Result<String> {
    result.context("applying dashboard edit")
}

#[cfg(test)]
mod tests {
    use super::config::{Command, RunnerConfig};
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use tianfa_domain::GameMode;
    use tianfa_shared::OptionKey;

    fn deps_for(dir: &TempDir, variables: serde_json::Value) -> RunnerDeps {
        let path = dir.path().join("variables.json");
        std::fs::write(&path, variables.to_string()).unwrap();
        RunnerDeps::from_config(&RunnerConfig {
            variables_file: path,
            ..RunnerConfig::default()
        })
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::from_args(Vec::<String>::new()), Ok(Command::Show));
        assert_eq!(Command::from_args(["delete-title", "2"]), Ok(Command::DeleteTitle(2)));
        assert_eq!(
            Command::from_args(["enable-mode", "抖M"]),
            Ok(Command::EnableMode(GameMode::Masochist))
        );
        assert_eq!(Command::from_args(["choose", "c"]), Ok(Command::Choose(OptionKey::C)));
        assert_eq!(Command::from_args(["modes"]), Ok(Command::Modes));
        assert!(Command::from_args(["delete-item"]).is_err());
        assert!(Command::from_args(["delete-item", "x"]).is_err());
        assert!(Command::from_args(["fly"]).is_err());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = RunnerConfig::from_lookup(|key| match key {
            "TIANFA_MESSAGE_ID" => Some(" 17 ".into()),
            "TIANFA_VARIABLES_FILE" => Some("".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.message_id, Some(17));
        assert_eq!(config.variables_file, RunnerConfig::default().variables_file);

        assert!(RunnerConfig::from_lookup(|_| Some("abc".into())).is_err());
    }

    #[test]
    fn test_delete_title_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let deps = deps_for(&dir, json!({"stat_data": {"主角": {"称号": ["A", "B"]}}, "keep": 1}));

        let notice = run(deps, Command::DeleteTitle(0)).unwrap();
        assert_eq!(notice, "已删除称号「A」。");

        let stored: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("variables.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(stored["stat_data"]["主角"]["称号"], json!(["B"]));
        assert_eq!(stored["keep"], json!(1));
    }

    #[test]
    fn test_enable_mode_confirms() {
        let dir = TempDir::new().unwrap();
        let deps = deps_for(&dir, json!({}));
        assert_eq!(run(deps, Command::EnableMode(GameMode::Corruption)).unwrap(), "「恶堕模式」已开启。");

        let deps = deps_for(&dir, json!({"模式": ["恶堕模式"]}));
        assert_eq!(
            run(deps, Command::EnableMode(GameMode::Corruption)).unwrap(),
            "「恶堕模式」已开启，开启后不可关闭。"
        );
    }

    #[test]
    fn test_modes_lists_rules_with_state() {
        let dir = TempDir::new().unwrap();
        let deps = deps_for(&dir, json!({"模式": ["恶堕模式"]}));
        let output = run(deps, Command::Modes).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[x] 普通模式: 标准执行协议"));
        assert!(lines[1].starts_with("[x] 恶堕模式: "));
        assert!(lines[2].starts_with("[ ] 抖M模式: "));
        assert!(lines[3].starts_with("[ ] 下克上模式: "));
    }

    #[test]
    fn test_delete_unknown_villain_fails() {
        let dir = TempDir::new().unwrap();
        let deps = deps_for(&dir, json!({"villains": [{"id": "a"}]}));
        assert!(run(deps, Command::DeleteVillain("b".into())).is_err());
    }

    #[test]
    fn test_show_prints_snapshot() {
        let dir = TempDir::new().unwrap();
        let deps = deps_for(&dir, json!({"世界": {"当前任务世界名称": "X"}}));
        let output = run(deps, Command::Show).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["world"]["当前任务世界名称"], json!("X"));
    }

    #[test]
    fn test_options_from_message_file() {
        let dir = TempDir::new().unwrap();
        let message = dir.path().join("message.txt");
        let input = dir.path().join("input.txt");
        std::fs::write(&message, "A. 进攻\nB. 撤退").unwrap();
        let config = RunnerConfig {
            variables_file: dir.path().join("variables.json"),
            message_file: Some(message),
            input_file: Some(input.clone()),
            ..RunnerConfig::default()
        };

        let listed = run(RunnerDeps::from_config(&config), Command::Options).unwrap();
        assert_eq!(listed, "A. 进攻\nB. 撤退");

        run(RunnerDeps::from_config(&config), Command::Choose(OptionKey::B)).unwrap();
        assert_eq!(std::fs::read_to_string(input).unwrap(), "撤退");
    }
}

//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置文件 → Dispatcher → 真实文件 / syslog sink 的端到端测试
//! - 环境变量覆盖
//! - 通道失败降级

#[cfg(test)]
mod contract_tests {
    use contracts::{ChannelThresholds, FanlogConfig, Severity};

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = FanlogConfig::default();
        let toml = config_loader::ConfigLoader::to_toml(&config).unwrap();
        let parsed =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.thresholds, ChannelThresholds::default());
        assert_eq!(parsed.thresholds.event, Some(Severity::Warning));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::panic::Location;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use contracts::{
        ConsoleSink, ConsoleStream, ContractError, ErrorRecord, FanlogConfig, LogOptions,
        ProcessExit, SerialSettings, SerialSink, Severity,
    };
    use dispatcher::{AppendFileSink, DispatcherBuilder, Logger};

    /// Console capturing stream lines and error payloads
    #[derive(Clone, Default)]
    struct CapturedConsole(Arc<Mutex<Vec<(String, String)>>>);

    impl CapturedConsole {
        fn take(&self) -> Vec<(String, String)> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl ConsoleSink for CapturedConsole {
        fn write(&self, stream: ConsoleStream, line: &str) {
            self.0
                .lock()
                .unwrap()
                .push((stream.label().to_string(), line.to_string()));
        }

        fn report_error(&self, payload: &str, location: &'static Location<'static>) {
            self.0
                .lock()
                .unwrap()
                .push((format!("ERROR@{}", location.line()), payload.to_string()));
        }
    }

    /// Serial device that is always present and records written lines
    #[derive(Clone, Default)]
    struct LoopbackSerial(Arc<Mutex<Vec<String>>>);

    impl SerialSink for LoopbackSerial {
        fn port_exists(&self, name: &str) -> bool {
            name == "/dev/ttyFAN0"
        }

        fn write(
            &self,
            _port: &str,
            settings: &SerialSettings,
            data: &str,
            wait: bool,
        ) -> Result<Option<String>, ContractError> {
            assert_eq!(settings.baud_rate, 115200);
            self.0.lock().unwrap().push(data.to_string());
            Ok(wait.then(|| "ACK".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct ExitCode(Arc<Mutex<Option<i32>>>);

    impl ProcessExit for ExitCode {
        fn terminate(&self, code: i32) {
            *self.0.lock().unwrap() = Some(code);
        }
    }

    fn load(toml: &str) -> FanlogConfig {
        config_loader::ConfigLoader::load_from_str(toml, config_loader::ConfigFormat::Toml)
            .unwrap()
    }

    fn config_for(dir: &Path) -> FanlogConfig {
        load(&format!(
            r#"
[defaults]
source = "nightly"
log_file = "{}"
serial_port = "/dev/ttyFAN0"
hostname = "build-01"

[thresholds]
console = "info"
event = "off"
file = "debug"
serial = "warning"

[serial]
baud_rate = 115200
wait_for_response = true

[exit]
default_code = 4
"#,
            dir.join("nightly.log").display()
        ))
    }

    struct Harness {
        logger: Logger,
        console: CapturedConsole,
        serial: LoopbackSerial,
        exit: ExitCode,
    }

    fn harness(config: FanlogConfig) -> Harness {
        let console = CapturedConsole::default();
        let serial = LoopbackSerial::default();
        let exit = ExitCode::default();

        let dispatcher = DispatcherBuilder::new(config)
            .console(console.clone())
            .file(AppendFileSink::new())
            .serial(serial.clone())
            .build()
            .unwrap();

        Harness {
            logger: Logger::with_exit(dispatcher, exit.clone()),
            console,
            serial,
            exit,
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_config_file_to_channels() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(config_for(dir.path()));

        h.logger.debug("warming up", &LogOptions::new());
        h.logger.warning("disk 91%\ndisk 93%", &LogOptions::new());

        let lines = read_lines(&dir.path().join("nightly.log"));
        assert_eq!(lines.len(), 3);
        for line in &lines {
            let fields: Vec<_> = line.split('\t').collect();
            assert_eq!(fields.len(), 5);
            assert_eq!(fields[1], "build-01");
            assert_eq!(fields[2], "nightly:");
        }
        assert!(lines[0].ends_with("[D]\twarming up"));
        assert!(lines[2].ends_with("[W]\tdisk 93%"));

        let serial = h.serial.0.lock().unwrap().clone();
        assert_eq!(serial.len(), 2);
        assert!(serial[0].ends_with(" nightly: [W] disk 91%"));

        let console = h.console.take();
        assert_eq!(console.len(), 2);
        assert!(console.iter().all(|(label, _)| label == "WARNING"));
    }

    #[test]
    fn test_fatal_after_structured_error() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(config_for(dir.path()));

        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "backup target missing");
        let record = ErrorRecord::capture(&err);
        let line = line!() + 1;
        h.logger.fatal(record, &LogOptions::new().source("restore"), None);

        assert_eq!(*h.exit.0.lock().unwrap(), Some(4));

        let console = h.console.take();
        assert_eq!(console.len(), 1);
        assert_eq!(console[0].0, format!("ERROR@{line}"));
        assert!(console[0].1.starts_with("backup target missing {"));

        let lines = read_lines(&dir.path().join("nightly.log"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("restore:\t[F]\tbackup target missing"));
    }

    #[test]
    fn test_env_overrides_reach_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config_loader::apply_overrides(
            &mut config,
            [
                ("FANLOG_FILE_LEVEL", "error"),
                ("FANLOG_SOURCE", "from-env"),
                ("PATH", "/usr/bin"),
            ],
        )
        .unwrap();
        let h = harness(config);

        h.logger.info("skipped by file gate", &LogOptions::new());
        h.logger.error("kept", &LogOptions::new());

        let lines = read_lines(&dir.path().join("nightly.log"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("from-env:\t[E]\tkept"));
    }

    #[test]
    fn test_missing_log_directory_downgrades() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(config_for(dir.path()));

        let options = LogOptions::new().log_file(dir.path().join("absent").join("x.log"));
        h.logger.error(["first", "second"], &options);

        let console = h.console.take();
        let warnings: Vec<_> = console.iter().filter(|(l, _)| l == "WARNING").collect();
        assert_eq!(warnings.len(), 1);
        let (stamp, text) = warnings[0].1.split_once(' ').unwrap();
        assert!(stamp.contains('T'), "warning lacks a timestamp: {stamp}");
        assert!(text.starts_with("Unable to write to file"));

        // serial and the console error path still ran
        assert_eq!(h.serial.0.lock().unwrap().len(), 2);
        assert!(console.iter().any(|(l, p)| l.starts_with("ERROR@") && p == "first\nsecond"));
    }

    #[test]
    fn test_logger_shared_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(config_for(dir.path()));
        let logger = Arc::new(h.logger);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for j in 0..10 {
                        logger.log(Severity::Debug, format!("t{i} m{j}"), &LogOptions::new());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(read_lines(&dir.path().join("nightly.log")).len(), 40);
    }

    #[test]
    fn test_unknown_level_token_emits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(config_for(dir.path()));

        assert!(h
            .logger
            .log_token("loud", "x", &LogOptions::new())
            .is_err());
        assert!(!dir.path().join("nightly.log").exists());
        assert!(h.console.take().is_empty());
    }
}

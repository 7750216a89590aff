//! Option parsing for `run`/`demo` and logging setup.

use regvm_vm::VmConfig;
use tracing_subscriber::EnvFilter;

/// Parsed arguments shared by the executing commands.
#[derive(Debug, PartialEq)]
pub struct RunOptions {
    pub config: VmConfig,
    pub trace: bool,
    /// Arguments that are not options, in order.
    pub positional: Vec<String>,
}

/// Parse `--memory-size`, `--stack-size`, `--call-stack-size` and `--trace`.
///
/// Reports the problem on stderr and returns exit code 1 on a bad flag.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, i32> {
    let mut options = RunOptions {
        config: VmConfig::default(),
        trace: false,
        positional: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--trace" => {
                options.trace = true;
                continue;
            }
            "--memory-size" => &mut options.config.memory_size,
            "--stack-size" => &mut options.config.stack_size,
            "--call-stack-size" => &mut options.config.call_stack_size,
            other if other.starts_with("--") => {
                eprintln!("error: unknown option '{other}'");
                return Err(1);
            }
            _ => {
                options.positional.push(arg.clone());
                continue;
            }
        };

        let Some(value) = iter.next() else {
            eprintln!("error: {arg} requires a value");
            return Err(1);
        };
        *slot = value.parse().map_err(|_| {
            eprintln!("error: {arg} expects a non-negative integer, got '{value}'");
            1
        })?;
    }

    Ok(options)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the engine logs at `info`, or at
/// `debug` with `--trace`.
pub fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("regvm=debug,regvm_vm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("regvm=info,regvm_vm=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        let options = parse_run_options(&args(&["prog.rvm"])).unwrap();
        assert_eq!(options.config, VmConfig::default());
        assert!(!options.trace);
        assert_eq!(options.positional, vec!["prog.rvm".to_string()]);
    }

    #[test]
    fn sizes_and_trace() {
        let options = parse_run_options(&args(&[
            "--stack-size",
            "4",
            "prog.rvmb",
            "--trace",
            "--memory-size",
            "16",
            "--call-stack-size",
            "2",
        ]))
        .unwrap();
        assert_eq!(
            options.config,
            VmConfig {
                memory_size: 16,
                stack_size: 4,
                call_stack_size: 2,
            }
        );
        assert!(options.trace);
        assert_eq!(options.positional, vec!["prog.rvmb".to_string()]);
    }

    #[test]
    fn bad_values_exit_1() {
        assert_eq!(parse_run_options(&args(&["--stack-size"])), Err(1));
        assert_eq!(parse_run_options(&args(&["--stack-size", "-3"])), Err(1));
        assert_eq!(parse_run_options(&args(&["--memory-size", "lots"])), Err(1));
        assert_eq!(parse_run_options(&args(&["--fast"])), Err(1));
    }
}

//! Command-line option parsing shared by the `gen`, `check` and `dump` commands.

use std::path::PathBuf;

use mri_codegen::BindingConfig;

/// Options following the command name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    /// Declaration file (the single positional argument).
    pub input: Option<String>,
    /// Where `gen` writes its files.
    pub out_dir: PathBuf,
    pub config: BindingConfig,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            input: None,
            out_dir: PathBuf::from("."),
            config: BindingConfig::default(),
        }
    }
}

/// Parse the arguments after the command name.
///
/// `-o` takes the next argument as the output directory; every other option
/// uses the `--name=value` form.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" {
            let Some(dir) = args.get(i + 1) else {
                return Err("missing directory after '-o'".to_string());
            };
            options.out_dir = PathBuf::from(dir);
            i += 2;
            continue;
        }

        if let Some(dir) = arg.strip_prefix("--out-dir=") {
            options.out_dir = PathBuf::from(dir);
        } else if let Some(dir) = arg.strip_prefix("--binding-dir=") {
            options.config = options.config.with_binding_dir(dir);
        } else if let Some(dir) = arg.strip_prefix("--engine-dir=") {
            options.config = options.config.with_engine_header_dir(dir);
        } else if let Some(namespace) = arg.strip_prefix("--namespace=") {
            options.config = options.config.with_native_namespace(namespace);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if options.input.is_none() {
            options.input = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
        i += 1;
    }
    Ok(options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_options(&args(&["api.json"])).unwrap();
        assert_eq!(options.input.as_deref(), Some("api.json"));
        assert_eq!(options.out_dir, PathBuf::from("."));
        assert_eq!(options.config, BindingConfig::default());
    }

    #[test]
    fn test_layout_flags() {
        let options = parse_options(&args(&[
            "--binding-dir=src/ruby/",
            "api.json",
            "-o",
            "out/gen",
            "--engine-dir=engine/api",
            "--namespace=urge",
        ]))
        .unwrap();
        assert_eq!(options.out_dir, PathBuf::from("out/gen"));
        assert_eq!(options.config.binding_dir, "src/ruby");
        assert_eq!(options.config.guard_prefix(), "SRC_RUBY");
        assert_eq!(options.config.engine_header_dir, "engine/api");
        assert_eq!(options.config.native_namespace, "urge");
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse_options(&args(&["a.json", "-o"])).is_err());
        assert!(parse_options(&args(&["--verbose"])).is_err());
        assert!(parse_options(&args(&["a.json", "b.json"])).is_err());
    }
}

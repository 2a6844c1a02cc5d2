use super::*;

/// Builds the configuration from defaults, the TOML file (if present) and command line arguments, in
/// increasing order of precedence.
pub fn build_config(args: Vec<String>) -> Result<MasterConfig, Box<dyn Error>> {
    build_config_with(args, real_filesystem())
}

pub fn build_config_with(args: Vec<String>, fs: Filesystem) -> Result<MasterConfig, Box<dyn Error>> {
    let mut builder = ConfigBuilder::new(config_entries());
    if args.iter().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", builder.help_text());
        return Ok(MasterConfig {
            happy_exit: true,
            ..MasterConfig::default()
        });
    }
    let toml_path = std::path::Path::new(DEFAULT_TOML_PATH);
    if fs.is_file(toml_path) {
        load_toml(toml_path, &mut builder, &*fs)?;
    }
    parse_args(&mut builder, args)?;
    let mut conf = MasterConfig::default();
    builder.apply_to(&mut conf)?;
    Ok(conf)
}

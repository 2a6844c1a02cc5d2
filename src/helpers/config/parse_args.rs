use super::*;

/// "--contact-drop-seconds" -> "contact_drop_seconds"
fn entry_name(arg_name: &str) -> String {
    arg_name.trim_start_matches('-').replace('-', "_")
}

fn try_set(builder: &mut ConfigBuilder, arg_name: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let name = entry_name(arg_name);
    let message = format!("{} command line argument", arg_name);
    if let Some(mut setter) = builder.entry(&name) {
        match &mut setter {
            ConfigEntrySetter::String(ref mut set) => return set(value.to_owned(), message),
            ConfigEntrySetter::Float(ref mut set) => {
                if let Ok(f) = value.parse::<f64>() {
                    return set(f, message);
                }
            }
        }
        Err(format!("{} is not valid for {} (expected: {})", value, arg_name, setter).into())
    } else {
        Err(format!("{} is not a valid command line option", arg_name).into())
    }
}

/// Applies `--option value` pairs. The first argument is the program name and is skipped.
pub fn parse_args(builder: &mut ConfigBuilder, args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        if !arg.starts_with('-') {
            return Err(format!(
                "command line argument {} is a value not an --option-name",
                arg
            )
            .into());
        }
        let (name, value) = match arg.find('=') {
            Some(i) => (arg[..i].to_string(), arg[i + 1..].to_string()),
            None => match args.next() {
                Some(value) if !value.starts_with("--") => (arg, value),
                _ => return Err(format!("{} requires a value", arg).into()),
            },
        };
        try_set(builder, &name, &value)?;
    }
    Ok(())
}

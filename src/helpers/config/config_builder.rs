use super::*;

pub type ConfigEntrySetterFn<'a, T> = Box<dyn FnMut(T, String) -> Result<(), Box<dyn Error>> + 'a>;

/// Lets a config source (TOML file, command line) set the value of an entry, as long as the source
/// can produce the type the entry wants
pub enum ConfigEntrySetter<'a> {
    String(ConfigEntrySetterFn<'a, String>),
    Float(ConfigEntrySetterFn<'a, f64>),
}

impl<'a> std::fmt::Display for ConfigEntrySetter<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::String(_) => "string",
                Self::Float(_) => "number",
            }
        )
    }
}

pub trait ConfigEntry {
    fn name(&self) -> &str;
    fn help(&self) -> &str;
    /// The current value (the default until a source sets it), formatted for --help
    fn default_text(&self) -> String;
    fn setter(&mut self) -> ConfigEntrySetter;
    fn apply_to(&self, target: &mut MasterConfig) -> Result<(), Box<dyn Error>>;
}

type ApplyFn<T> = Box<dyn Fn(&mut MasterConfig, T, Option<&str>) -> Result<(), Box<dyn Error>>>;

impl dyn ConfigEntry {
    pub fn new_string<F>(name: &str, help: &str, default_value: &str, apply: F) -> Box<Self>
    where
        F: Fn(&mut MasterConfig, String, Option<&str>) -> Result<(), Box<dyn Error>> + 'static,
    {
        Box::new(ConfigEntryImpl {
            name: name.to_string(),
            help: help.to_string(),
            target: SetterTarget::new(default_value.to_string()),
            apply_fn: Box::new(apply),
            setter_builder: |target| {
                ConfigEntrySetter::String(Box::new(move |value, source| {
                    target.set(value, source);
                    Ok(())
                }))
            },
        })
    }

    pub fn new_float<F>(name: &str, help: &str, default_value: f64, apply: F) -> Box<Self>
    where
        F: Fn(&mut MasterConfig, f64, Option<&str>) -> Result<(), Box<dyn Error>> + 'static,
    {
        Box::new(ConfigEntryImpl {
            name: name.to_string(),
            help: help.to_string(),
            target: SetterTarget::new(default_value),
            apply_fn: Box::new(apply),
            setter_builder: |target| {
                ConfigEntrySetter::Float(Box::new(move |value, source| {
                    if !value.is_finite() {
                        return Err(format!("{} is not a finite number", source).into());
                    }
                    target.set(value, source);
                    Ok(())
                }))
            },
        })
    }
}

pub struct SetterTarget<T> {
    value: T,
    /// Some if the value is not default, describes how it was set
    source: Option<String>,
}

impl<T> SetterTarget<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            source: None,
        }
    }

    fn set(&mut self, value: T, source: String) {
        self.value = value;
        self.source = Some(source);
    }
}

struct ConfigEntryImpl<T> {
    name: String,
    help: String,
    target: SetterTarget<T>,
    apply_fn: ApplyFn<T>,
    setter_builder: fn(&mut SetterTarget<T>) -> ConfigEntrySetter,
}

impl<T: Clone + std::fmt::Display + 'static> ConfigEntry for ConfigEntryImpl<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn default_text(&self) -> String {
        format!("{}", self.target.value)
    }

    fn setter(&mut self) -> ConfigEntrySetter {
        (self.setter_builder)(&mut self.target)
    }

    fn apply_to(&self, target: &mut MasterConfig) -> Result<(), Box<dyn Error>> {
        (self.apply_fn)(
            target,
            self.target.value.clone(),
            self.target.source.as_deref(),
        )
    }
}

pub struct ConfigBuilder {
    entries: Vec<Box<dyn ConfigEntry>>,
}

impl ConfigBuilder {
    pub fn new(entries: Vec<Box<dyn ConfigEntry>>) -> Self {
        let mut names = HashSet::new();
        for entry in &entries {
            if !names.insert(entry.name().to_string()) {
                panic!("duplicate configuration entry {}", entry.name());
            }
        }
        Self { entries }
    }

    pub fn entry(&mut self, name: &str) -> Option<ConfigEntrySetter> {
        // Linear search is fine for a handful of entries
        for entry in &mut self.entries {
            if entry.name() == name {
                return Some(entry.setter());
            }
        }
        None
    }

    pub fn help_text(&self) -> String {
        let mut text = format!(
            "usage: spaceship-sim-server [--option value]...\noptions may also be set in {}\n",
            DEFAULT_TOML_PATH
        );
        for entry in &self.entries {
            text.push_str(&format!(
                "\n  --{} (default: {})\n      {}",
                entry.name().replace('_', "-"),
                entry.default_text(),
                entry.help()
            ));
        }
        text
    }

    pub fn apply_to(&self, target: &mut MasterConfig) -> Result<(), Box<dyn Error>> {
        for entry in &self.entries {
            entry
                .apply_to(target)
                .map_err(|e| format!("{} configuration option: {}", entry.name(), e))?;
        }
        Ok(())
    }
}

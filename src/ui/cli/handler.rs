// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, DumpArgs, InspectArgs};
use crate::config::Config;
use crate::memory::Value;
use crate::structure::{FieldKind, LayoutSpec, StructError, StructField, StructInstance, StructLayout, TypeRegistry};
use crate::ui::display::DisplayRenderer;
use crate::utils::LoggingUtils;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        if let Some(path) = &args.config {
            self.config = Config::load(path)?;
        }
        if let Some(level) = &args.log_level {
            self.config = self.config.with_log_level(level);
        }
        if args.no_color {
            self.config = self.config.with_color(false);
        }
        self.config.validate().map_err(|e| anyhow::anyhow!(e))?;

        self.setup_logging();
        if !self.config.color {
            colored::control::set_override(false);
        }
        self.config.apply_typedefs(TypeRegistry::global())?;

        match args.command {
            Command::Types => self.handle_types(),
            Command::Inspect(inspect_args) => self.handle_inspect(inspect_args),
            Command::Dump(dump_args) => self.handle_dump(dump_args),
        }
    }

    fn setup_logging(&self) {
        LoggingUtils::init_logger(LoggingUtils::level_from_str(&self.config.log_level));
    }

    fn renderer(&self) -> DisplayRenderer {
        DisplayRenderer::new()
            .with_color(self.config.color)
            .with_hexdump_width(self.config.hexdump_width)
    }

    fn handle_types(&self) -> anyhow::Result<()> {
        let registry = TypeRegistry::global();
        for name in registry.names() {
            let ty = registry.find(&name)?;
            let size = ty.size().map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
            println!("  {:<10} {:>2}  {}", name, size, ty.native_type().to_string().dimmed());
        }
        Ok(())
    }

    fn handle_inspect(&self, args: InspectArgs) -> anyhow::Result<()> {
        let (spec, layout) = load_layout(&args.layout)?;
        if args.json {
            println!("{}", LayoutSpec::describe(&spec.name, &layout).to_json()?);
        } else {
            print!("{}", self.renderer().render_layout(&spec.name, &layout));
        }
        Ok(())
    }

    fn handle_dump(&self, args: DumpArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let (spec, layout) = load_layout(&args.layout)?;
        let instance = StructInstance::with_layout(layout, None)?;
        for (name, text) in args.assignments() {
            let value = parse_assignment(instance.field(name)?, text)?;
            log::debug!("{} = {}", name, value);
            instance
                .set(name, value)
                .with_context(|| format!("assigning {}", name))?;
        }

        let mut renderer = self.renderer();
        if let Some(width) = args.width {
            renderer = renderer.with_hexdump_width(width);
        }
        print!("{}", renderer.render_layout(&spec.name, instance.layout()));
        println!();
        print!("{}", renderer.render_values(&instance.values()?));
        println!();
        print!("{}", renderer.hexdump(&instance.pointer().to_vec()?));
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_layout(path: &Path) -> anyhow::Result<(LayoutSpec, Arc<StructLayout>)> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading layout {}", path.display()))?;
    let mut spec = LayoutSpec::from_json(&text).with_context(|| format!("parsing layout {}", path.display()))?;
    if spec.name.is_empty() {
        spec.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Struct".to_string());
    }
    let layout = spec.build(TypeRegistry::global())?;
    Ok((spec, Arc::new(layout)))
}

/// Array fields take a comma separated list, char arrays take the text as is.
pub fn parse_assignment(field: &StructField, text: &str) -> Result<Value, StructError> {
    if let FieldKind::Custom(handler) = field.kind() {
        if handler.type_name() == "char_array" {
            return Ok(Value::string(text));
        }
        if handler.count().is_some() {
            let items = text
                .trim_matches(|c| c == '[' || c == ']')
                .split(',')
                .map(|part| Value::parse(None, part.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Value::Array(items));
        }
    }
    Ok(Value::parse(field.native_type(), text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{ArrayField, BoolField, CharArrayField};

    #[test]
    fn test_parse_assignment() {
        let int32 = StructField::new(0, Some("int32")).unwrap();
        assert_eq!(parse_assignment(&int32, "-5").unwrap(), Value::Int64(-5));

        let name = StructField::custom(0, Arc::new(CharArrayField::new(8)));
        assert_eq!(parse_assignment(&name, "42").unwrap(), Value::string("42"));

        let flag = StructField::custom(0, Arc::new(BoolField));
        assert_eq!(parse_assignment(&flag, "true").unwrap(), Value::Bool(true));

        let uint8 = TypeRegistry::global().find("uint8").unwrap();
        let bytes = StructField::custom(0, Arc::new(ArrayField::new(uint8, 3)));
        assert_eq!(
            parse_assignment(&bytes, "[1, 2,3]").unwrap(),
            Value::Array(vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)])
        );
    }

    #[test]
    fn test_load_layout_names_from_file_stem() {
        let path = std::env::temp_dir().join(format!("rawstruct_point_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "fields": [ { "name": "x", "offset": 0, "type": "int32" }, { "name": "y", "offset": 4, "type": "double" } ] }"#,
        )
        .unwrap();
        let (spec, layout) = load_layout(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(spec.name.starts_with("rawstruct_point_"));
        assert_eq!(layout.size(), 12);

        let instance = StructInstance::with_layout(layout, None).unwrap();
        instance.set("y", parse_assignment(instance.field("y").unwrap(), "2.5").unwrap()).unwrap();
        assert_eq!(instance.get("y").unwrap(), Value::Float64(2.5));
    }

    #[test]
    fn test_missing_layout_file() {
        assert!(load_layout(Path::new("/nonexistent/layout.json")).is_err());
    }

    #[test]
    fn test_oversized_offset_in_layout_file() {
        let path = std::env::temp_dir().join(format!("rawstruct_big_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "fields": [ { "name": "a", "offset": 18446744073709551615, "type": "int32" } ] }"#,
        )
        .unwrap();
        let result = load_layout(&path);
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<StructError>(),
            Some(&StructError::FieldOverflow("a".into()))
        );
    }
}

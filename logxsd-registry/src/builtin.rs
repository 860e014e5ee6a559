//! Built-in catalog of logging target plugins.
//!
//! This is the registry the command-line tool introspects when no registry
//! description is supplied. It mirrors the target plugins shipped with a
//! classic logging framework: file and console writers, database and mail
//! senders, network forwarders, wrappers and compound groups.

use crate::catalog::Registry;
use crate::error::RegistryError;
use crate::types::{ComponentAnnotation, Primitive, Property, TypeKey, TypeKind, WellKnown};

/// Keys of the value types shared by most targets.
struct Builder {
    registry: Registry,
    object: TypeKey,
    string: TypeKey,
    boolean: TypeKey,
    int32: TypeKey,
}

impl Builder {
    fn new() -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        let object = registry.declare("Object", TypeKind::Structured)?;
        registry.mark_well_known(WellKnown::Root, object)?;

        let mut builder = Self {
            registry,
            object,
            string: object,
            boolean: object,
            int32: object,
        };
        builder.string = builder.value("String", TypeKind::String)?;
        builder.boolean = builder.value("Boolean", TypeKind::Primitive(Primitive::Boolean))?;
        builder.int32 = builder.value("Int32", TypeKind::Primitive(Primitive::Int32))?;
        Ok(builder)
    }

    /// Declares a type deriving directly from the universal root.
    fn value(&mut self, name: &str, kind: TypeKind) -> Result<TypeKey, RegistryError> {
        let key = self.registry.declare(name, kind)?;
        self.registry.set_base(key, self.object)?;
        Ok(key)
    }

    fn enumeration(&mut self, name: &str, members: &[&str]) -> Result<TypeKey, RegistryError> {
        let members = members.iter().map(|m| (*m).to_string()).collect();
        self.value(name, TypeKind::Enum(members))
    }

    fn structured(&mut self, name: &str, base: TypeKey) -> Result<TypeKey, RegistryError> {
        let key = self.registry.declare(name, TypeKind::Structured)?;
        self.registry.set_base(key, base)?;
        Ok(key)
    }

    /// Declares a root target plugin.
    fn target(
        &mut self,
        name: &str,
        base: TypeKey,
        annotation: ComponentAnnotation,
    ) -> Result<TypeKey, RegistryError> {
        let key = self.structured(name, base)?;
        self.registry.set_component(key, annotation)?;
        self.registry.add_root(key)?;
        Ok(key)
    }

    fn props(&mut self, owner: TypeKey, props: Vec<Property>) -> Result<(), RegistryError> {
        for prop in props {
            self.registry.add_property(owner, prop)?;
        }
        Ok(())
    }

    fn text(&self, name: &str) -> Property {
        Property::new(name, self.string)
    }

    fn layout(&self, name: &str) -> Property {
        Property::new(name, self.string).accepting_layout()
    }

    fn flag(&self, name: &str) -> Property {
        Property::new(name, self.boolean)
    }

    fn number(&self, name: &str) -> Property {
        Property::new(name, self.int32)
    }
}

/// Builds the built-in logging target catalog.
///
/// # Errors
/// Returns `RegistryError` only if the catalog definition itself is
/// inconsistent.
pub fn logging_targets() -> Result<Registry, RegistryError> {
    let mut b = Builder::new()?;
    let object = b.object;

    let byte = b.value("Byte", TypeKind::Primitive(Primitive::Byte))?;
    let int64 = b.value("Int64", TypeKind::Primitive(Primitive::Int64))?;

    let layout = b.structured("Layout", object)?;
    b.registry.mark_well_known(WellKnown::Layout, layout)?;
    let condition = b.structured("ConditionExpression", object)?;
    b.registry.mark_well_known(WellKnown::Condition, condition)?;

    let target = b.structured("Target", object)?;
    b.registry.mark_well_known(WellKnown::Component, target)?;
    let targets = b.structured("TargetCollection", object)?;
    b.registry
        .mark_well_known(WellKnown::ComponentCollection, targets)?;
    b.props(
        target,
        vec![b.text("Name"), Property::new("Layout", layout)],
    )?;

    let line_ending = b.enumeration("LineEndingMode", &["Default", "CRLF", "CR", "LF", "None"])?;
    let numbering = b.enumeration("ArchiveNumberingMode", &["Sequence", "Rolling"])?;
    let period = b.enumeration(
        "FileArchivePeriod",
        &["None", "Year", "Month", "Day", "Hour", "Minute"],
    )?;
    let color = b.enumeration(
        "ConsoleOutputColor",
        &[
            "Black",
            "DarkBlue",
            "DarkGreen",
            "DarkCyan",
            "DarkRed",
            "DarkMagenta",
            "DarkYellow",
            "Gray",
            "DarkGray",
            "Blue",
            "Green",
            "Cyan",
            "Red",
            "Magenta",
            "Yellow",
            "White",
            "NoChange",
        ],
    )?;
    let network_overflow =
        b.enumeration("NetworkTargetOverflowAction", &["Error", "Split", "Discard"])?;
    let async_overflow =
        b.enumeration("AsyncTargetWrapperOverflowAction", &["Grow", "Discard", "Block"])?;
    let smtp_auth = b.enumeration("SmtpAuthenticationMode", &["None", "Basic", "Ntlm"])?;

    let with_header = b.structured("TargetWithLayoutHeaderAndFooter", target)?;
    b.props(
        with_header,
        vec![
            b.layout("Header"),
            b.layout("Footer"),
            Property::new("CompiledHeader", layout),
        ],
    )?;

    let file = b.target("FileTarget", with_header, ComponentAnnotation::new("File"))?;
    b.props(
        file,
        vec![
            b.layout("FileName"),
            b.flag("CreateDirs"),
            b.flag("KeepFileOpen"),
            Property::new("LineEnding", line_ending),
            b.text("Encoding"),
            b.flag("ConcurrentWrites"),
            Property::new("ArchiveAboveSize", int64),
            b.number("MaxArchiveFiles"),
            Property::new("ArchiveNumbering", numbering),
            Property::new("ArchiveEvery", period),
            b.layout("ArchiveFileName"),
            b.number("BufferSize"),
            b.flag("AutoFlush"),
            b.flag("DeleteOldFileOnStartup"),
            b.flag("IsOpen").read_only(),
        ],
    )?;

    let console = b.target("ConsoleTarget", with_header, ComponentAnnotation::new("Console"))?;
    b.props(console, vec![b.flag("Error")])?;

    let row_rule = b.structured("ConsoleRowHighlightingRule", object)?;
    b.props(
        row_rule,
        vec![
            b.text("Condition").accepting_condition(),
            Property::new("ForegroundColor", color),
            Property::new("BackgroundColor", color),
        ],
    )?;
    let word_rule = b.structured("ConsoleWordHighlightingRule", object)?;
    b.props(
        word_rule,
        vec![
            b.text("Text"),
            b.text("Regex"),
            b.flag("IgnoreCase"),
            b.flag("WholeWords"),
            Property::new("ForegroundColor", color),
            Property::new("BackgroundColor", color),
        ],
    )?;
    let row_rules = b.structured("ConsoleRowHighlightingRuleCollection", object)?;
    let word_rules = b.structured("ConsoleWordHighlightingRuleCollection", object)?;
    let colored = b.target(
        "ColoredConsoleTarget",
        with_header,
        ComponentAnnotation::new("ColoredConsole"),
    )?;
    b.props(
        colored,
        vec![
            b.flag("ErrorStream"),
            b.flag("UseDefaultRowHighlightingRules"),
            Property::new("RowHighlightingRules", row_rules)
                .read_only()
                .with_array_element("highlight-row", row_rule),
            Property::new("WordHighlightingRules", word_rules)
                .read_only()
                .with_array_element("highlight-word", word_rule),
        ],
    )?;

    b.target("DebuggerTarget", target, ComponentAnnotation::new("Debugger"))?;

    let db_param = b.structured("DatabaseParameterInfo", object)?;
    b.props(
        db_param,
        vec![
            b.text("Name"),
            b.layout("Layout"),
            b.number("Size"),
            Property::new("Precision", byte),
            Property::new("Scale", byte),
        ],
    )?;
    let db_params = b.structured("DatabaseParameterInfoCollection", object)?;
    let database = b.target(
        "DatabaseTarget",
        target,
        ComponentAnnotation::new("Database").ignoring_layout(),
    )?;
    b.props(
        database,
        vec![
            b.text("DBProvider"),
            b.layout("ConnectionString"),
            b.flag("KeepConnection"),
            b.flag("UseTransactions"),
            b.layout("DBHost"),
            b.layout("DBUserName"),
            b.layout("DBPassword"),
            b.layout("DBDatabase"),
            b.layout("CommandText"),
            Property::new("Parameters", db_params)
                .read_only()
                .with_array_element("parameter", db_param),
        ],
    )?;

    let mail = b.target("MailTarget", with_header, ComponentAnnotation::new("Mail"))?;
    b.props(
        mail,
        vec![
            b.layout("From"),
            b.layout("To"),
            b.layout("CC"),
            b.layout("BCC"),
            b.layout("Subject"),
            b.layout("Body"),
            b.flag("AddNewLines"),
            b.text("Encoding"),
            b.text("SmtpServer"),
            Property::new("SmtpAuthentication", smtp_auth),
            b.text("SmtpUsername"),
            b.text("SmtpPassword"),
            b.number("SmtpPort"),
            b.flag("Html"),
        ],
    )?;

    let network = b.target("NetworkTarget", target, ComponentAnnotation::new("Network"))?;
    b.props(
        network,
        vec![
            b.layout("Address"),
            b.flag("KeepConnection"),
            b.flag("NewLine"),
            b.number("MaxMessageSize"),
            Property::new("OnOverflow", network_overflow),
            b.text("Encoding"),
        ],
    )?;

    let viewer_param = b.structured("NLogViewerParameterInfo", object)?;
    b.props(viewer_param, vec![b.text("Name"), b.layout("Layout")])?;
    let viewer_params = b.structured("NLogViewerParameterInfoCollection", object)?;
    let viewer = b.target(
        "NLogViewerTarget",
        network,
        ComponentAnnotation::new("NLogViewer").ignoring_layout(),
    )?;
    b.props(
        viewer,
        vec![
            b.flag("IncludeNLogData"),
            b.text("AppInfo"),
            b.flag("IncludeCallSite"),
            b.flag("IncludeSourceInfo"),
            Property::new("Parameters", viewer_params)
                .read_only()
                .with_array_element("parameter", viewer_param),
        ],
    )?;

    let null = b.target("NullTarget", target, ComponentAnnotation::new("Null"))?;
    b.props(null, vec![b.flag("FormatMessage")])?;

    b.target("TraceTarget", target, ComponentAnnotation::new("Trace"))?;

    let call_param = b.structured("MethodCallParameter", object)?;
    b.props(
        call_param,
        vec![b.text("Name"), b.text("Type"), b.layout("Layout")],
    )?;
    let call_params = b.structured("MethodCallParameterCollection", object)?;
    let call_base = b.structured("MethodCallTargetBase", target)?;
    b.props(
        call_base,
        vec![
            Property::new("Parameters", call_params)
                .read_only()
                .with_array_element("parameter", call_param),
        ],
    )?;
    let call = b.target(
        "MethodCallTarget",
        call_base,
        ComponentAnnotation::new("MethodCall").ignoring_layout(),
    )?;
    b.props(call, vec![b.text("ClassName"), b.text("MethodName")])?;

    let wrapper = b.structured("WrapperTargetBase", target)?;
    b.props(wrapper, vec![Property::new("WrappedTarget", target)])?;

    let async_wrapper = b.target(
        "AsyncTargetWrapper",
        wrapper,
        ComponentAnnotation::new("AsyncWrapper").ignoring_layout(),
    )?;
    b.props(
        async_wrapper,
        vec![
            b.number("QueueLimit"),
            b.number("TimeToSleepBetweenBatches"),
            b.number("BatchSize"),
            Property::new("OverflowAction", async_overflow),
        ],
    )?;

    let buffering = b.target(
        "BufferingTargetWrapper",
        wrapper,
        ComponentAnnotation::new("BufferingWrapper").ignoring_layout(),
    )?;
    b.props(
        buffering,
        vec![b.number("BufferSize"), b.number("FlushTimeout")],
    )?;

    let filtering = b.target(
        "FilteringTargetWrapper",
        wrapper,
        ComponentAnnotation::new("FilteringWrapper").ignoring_layout(),
    )?;
    b.props(filtering, vec![b.text("Condition").accepting_condition()])?;

    let retrying = b.target(
        "RetryingTargetWrapper",
        wrapper,
        ComponentAnnotation::new("RetryingWrapper").ignoring_layout(),
    )?;
    b.props(
        retrying,
        vec![b.number("RetryCount"), b.number("RetryDelayMilliseconds")],
    )?;

    let repeating = b.target(
        "RepeatingTargetWrapper",
        wrapper,
        ComponentAnnotation::new("RepeatingWrapper").ignoring_layout(),
    )?;
    b.props(repeating, vec![b.number("RepeatCount")])?;

    let compound = b.structured("CompoundTargetBase", target)?;
    b.props(
        compound,
        vec![Property::new("Targets", targets).read_only()],
    )?;
    b.target(
        "SplitTargetGroup",
        compound,
        ComponentAnnotation::new("SplitGroup").ignoring_layout(),
    )?;
    let fallback = b.target(
        "FallbackTargetGroup",
        compound,
        ComponentAnnotation::new("FallbackGroup").ignoring_layout(),
    )?;
    b.props(fallback, vec![b.flag("ReturnToFirstOnSuccess")])?;
    b.target(
        "RoundRobinTargetGroup",
        compound,
        ComponentAnnotation::new("RoundRobinGroup").ignoring_layout(),
    )?;

    Ok(b.registry)
}

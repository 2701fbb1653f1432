pub const BUILDER_CLASS_NAME: &str = "Builder";

pub const BUILDER_PARAMETER_NAME: &str = "builder";
pub const COPY_PARAMETER_NAME: &str = "copy";
pub const BUILD_METHOD_NAME: &str = "build";

pub const SETTER_PARAMETER_NAME: &str = "val";
/// Used instead of [`SETTER_PARAMETER_NAME`] when the field itself is called `val`.
pub const SETTER_PARAMETER_FALLBACK_NAME: &str = "value";

pub const JSR305_NONNULL: &str = "javax.annotation.Nonnull";
pub const FINDBUGS_NONNULL: &str = "edu.umd.cs.findbugs.annotations.NonNull";

pub const SUPPRESS_WARNINGS: &str = "java.lang.SuppressWarnings";
pub const PMD_AVOID_FIELD_NAME_MATCHING_METHOD_NAME: &str = "\"PMD.AvoidFieldNameMatchingMethodName\"";

pub const OBJECTS_CLASS: &str = "java.util.Objects";
pub const REQUIRE_NON_NULL: &str = "requireNonNull";

pub const OPTION_KEY_PREFIX: &str = "GenerateInnerBuilder";

/// Logging facade types never worth exposing on a builder.
pub const LOGGER_TYPES: &[&str] = &[
  "org.apache.log4j.Logger",
  "org.apache.logging.log4j.Logger",
  "java.util.logging.Logger",
  "org.slf4j.Logger",
  "ch.qos.logback.classic.Logger",
  "net.sf.microlog.core.Logger",
  "org.apache.commons.logging.Log",
  "org.pmw.tinylog.Logger",
  "org.jboss.logging.Logger",
  "jodd.log.Logger",
];

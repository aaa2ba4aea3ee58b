//! Error types for the mapper.

use std::fmt;

use crate::path::Path;

/// The error type hooks return.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The stage of the hook pipeline that failed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum HookStage {
    ShouldConvert,
    Filter,
    Rename,
    MapValue,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookStage::ShouldConvert => "ShouldConvert",
            HookStage::Filter => "Filter",
            HookStage::Rename => "Rename",
            HookStage::MapValue => "MapValue",
        };
        f.write_str(name)
    }
}

/// A hook failed and the conversion was aborted.
///
/// The hook's own error is kept as the `source()`, untouched, so callers can
/// downcast it back to the type their hook returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ShouldConvert failed: {source}")]
    ShouldConvertFailed {
        path: Path,
        #[source]
        source: HookError,
    },

    #[error("Filter failed: {source}")]
    FilterFailed {
        path: Path,
        #[source]
        source: HookError,
    },

    #[error("Rename failed: {source}")]
    RenameFailed {
        path: Path,
        #[source]
        source: HookError,
    },

    #[error("MapValue failed: {source}")]
    MapValueFailed {
        path: Path,
        #[source]
        source: HookError,
    },
}

impl Error {
    pub(crate) fn hook_failed(stage: HookStage, path: Path, source: HookError) -> Self {
        match stage {
            HookStage::ShouldConvert => Error::ShouldConvertFailed { path, source },
            HookStage::Filter => Error::FilterFailed { path, source },
            HookStage::Rename => Error::RenameFailed { path, source },
            HookStage::MapValue => Error::MapValueFailed { path, source },
        }
    }

    pub fn stage(&self) -> HookStage {
        match self {
            Error::ShouldConvertFailed { .. } => HookStage::ShouldConvert,
            Error::FilterFailed { .. } => HookStage::Filter,
            Error::RenameFailed { .. } => HookStage::Rename,
            Error::MapValueFailed { .. } => HookStage::MapValue,
        }
    }

    /// Path of the element (or composite, for `ShouldConvert`) being processed.
    pub fn path(&self) -> &Path {
        match self {
            Error::ShouldConvertFailed { path, .. }
            | Error::FilterFailed { path, .. }
            | Error::RenameFailed { path, .. }
            | Error::MapValueFailed { path, .. } => path,
        }
    }

    /// The error the hook returned.
    pub fn hook_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        match self {
            Error::ShouldConvertFailed { source, .. }
            | Error::FilterFailed { source, .. }
            | Error::RenameFailed { source, .. }
            | Error::MapValueFailed { source, .. } => source.as_ref(),
        }
    }

    /// Unwrap into the error the hook returned.
    pub fn into_hook_error(self) -> HookError {
        match self {
            Error::ShouldConvertFailed { source, .. }
            | Error::FilterFailed { source, .. }
            | Error::RenameFailed { source, .. }
            | Error::MapValueFailed { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[derive(Debug, PartialEq)]
    struct Denied(&'static str);

    impl fmt::Display for Denied {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "denied: {}", self.0)
        }
    }

    impl StdError for Denied {}

    #[test]
    fn display_names_the_stage() {
        let e = Error::hook_failed(HookStage::Filter, Path::root(), Box::new(Denied("x")));
        assert_eq!(e.to_string(), "Filter failed: denied: x");

        let e = Error::hook_failed(HookStage::MapValue, Path::root(), "boom".into());
        assert_eq!(e.to_string(), "MapValue failed: boom");
    }

    #[test]
    fn stage_matches_variant() {
        for stage in [
            HookStage::ShouldConvert,
            HookStage::Filter,
            HookStage::Rename,
            HookStage::MapValue,
        ] {
            let e = Error::hook_failed(stage, Path::root(), "err".into());
            assert_eq!(e.stage(), stage);
            assert!(e.to_string().starts_with(&stage.to_string()));
        }
    }

    #[test]
    fn source_is_the_hook_error() {
        let e = Error::hook_failed(
            HookStage::Rename,
            Path::root().field("Field"),
            Box::new(Denied("rename")),
        );
        let source = StdError::source(&e).unwrap();
        assert_eq!(source.downcast_ref::<Denied>(), Some(&Denied("rename")));
        assert_eq!(e.hook_error().downcast_ref::<Denied>(), Some(&Denied("rename")));
        assert_eq!(e.path().to_string(), ".Field");
    }

    #[test]
    fn into_hook_error_unwraps() {
        let e = Error::hook_failed(HookStage::ShouldConvert, Path::root(), Box::new(Denied("y")));
        let hook_error = e.into_hook_error();
        assert_eq!(*hook_error.downcast::<Denied>().unwrap(), Denied("y"));
    }
}

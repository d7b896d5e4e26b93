use crate::bind::{Binder, FlagSet};
use crate::error::{FlagError, ParseError};
use crate::field::Flags;
use crate::schema::{Schema, Walker};
use crate::target::Target;
use crate::tokens;
use crate::types::Options;

/// Derives flags from structures and applies command-line overrides to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMaker {
    options: Options,
}

impl FlagMaker {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn builder() -> FlagMakerBuilder {
        FlagMakerBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The namespace tree of `T`, without an instance.
    pub fn schema<T: Flags>(&self) -> Schema {
        Walker::new(&self.options.tag_key).walk::<T>()
    }

    /// The flag names `T` would define, in definition order.
    pub fn flag_names<T: Flags>(&self) -> Result<Vec<String>, FlagError> {
        self.schema::<T>().flag_names(self.options.flatten)
    }

    /// Bind every flag of `target` to its storage.
    ///
    /// Names are checked against the type before anything is touched: on
    /// error the target is left exactly as it was, absent layers included.
    pub fn bind<'a>(&self, target: impl Into<Target<'a>>) -> Result<FlagSet<'a>, FlagError> {
        let value = target.into().resolve()?;
        let schema = Walker::new(&self.options.tag_key).walk_value(&*value);
        schema.flag_names(self.options.flatten)?;
        Binder::new(&self.options).bind_value(value)
    }

    /// Apply `args` to `target` and return the tokens left after the flags.
    ///
    /// Parsing stops at the first non-flag token or after `--`. On error the
    /// [`ParseError`] carries the tokens that were not consumed; overrides
    /// applied before the failing token stay applied.
    pub fn parse_args<'a, I, S>(
        &self,
        target: impl Into<Target<'a>>,
        args: I,
    ) -> Result<Vec<String>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut set = match self.bind(target) {
            Ok(set) => set,
            Err(err) => return Err(ParseError::new(err, args)),
        };
        log::debug!("parsing {} tokens against {} flags", args.len(), set.len());
        tokens::parse(&mut set, args)
    }

    /// Usage listing for every flag of `target`, sorted by name.
    ///
    /// Binds `target` to read its defaults, so absent `Option` layers holding
    /// flags are allocated with `T::default()` exactly as [`parse_args`](Self::parse_args)
    /// would. Use [`flag_names`](Self::flag_names) for a listing that leaves the target alone.
    pub fn usage<'a>(&self, target: impl Into<Target<'a>>) -> Result<String, FlagError> {
        Ok(self.bind(target)?.usage())
    }

    /// A [`clap::Command`] declaring every flag of `target`.
    ///
    /// Like [`usage`](Self::usage), this binds `target` and allocates its
    /// absent `Option` layers that hold flags.
    #[cfg(feature = "clap")]
    pub fn command<'a>(
        &self,
        target: impl Into<Target<'a>>,
        app_name: &str,
    ) -> Result<clap::Command, FlagError> {
        Ok(crate::cli::command_for(&self.bind(target)?, app_name))
    }
}

/// Builder for [`FlagMaker`].
#[derive(Debug, Clone, Default)]
pub struct FlagMakerBuilder {
    options: Options,
}

impl FlagMakerBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Name flags by the leaf's own segment instead of its full path
    /// (default: `false`).
    ///
    /// Flattened names must be unique across the whole structure; a collision
    /// fails with [`FlagError::DuplicateFlagName`].
    pub fn flatten(mut self, flatten: bool) -> Self {
        self.options.flatten = flatten;
        self
    }

    /// Attribute key whose `rename` supplies name segments (default: `"serde"`).
    pub fn tag_key(mut self, key: &str) -> Self {
        self.options.tag_key = key.to_string();
        self
    }

    /// Replace every option at once, e.g. with [`Options::from_toml`].
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> FlagMaker {
        FlagMaker::new(self.options)
    }
}

/// Apply `args` to `target` with default options.
///
/// ```ignore
/// #[derive(Flags, Default)]
/// struct Config {
///     pub logging: Logging,
/// }
///
/// let mut cfg = Config::default();
/// let rest = flagmaker::parse_args(&mut cfg, std::env::args().skip(1))?;
/// ```
pub fn parse_args<'a, I, S>(target: impl Into<Target<'a>>, args: I) -> Result<Vec<String>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FlagMaker::default().parse_args(target, args)
}

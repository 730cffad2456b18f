use crate::error::FftError;

/// Options that shape how a transform is constructed.
///
/// Calling the transform builders without specifying options will automatically select
/// reasonable defaults depending on the input size and other factors.
///
/// None of these options change the mathematical result beyond the precision of the
/// twiddle factors: the short-loop unrolling and the parallel fork-join produce the same
/// output bits as their plain counterparts.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Options {
    /// Number of fractional limbs kept by the exact root-of-unity evaluator
    pub places: usize,
    /// Base of a single limb of the exact arithmetic, in `[2, 10^9]`
    pub limb_base: u32,
    /// When the sine/cosine series stops
    pub series: SeriesPolicy,
    /// Combine stages whose sub-size `M` is at most this value are unrolled
    pub static_loop_limit: usize,
    /// How powers of two are grouped into butterflies
    pub radix_grouping: RadixGrouping,
    /// Largest prime radix served by the generic prime-size kernel, never above 251
    pub max_generic_radix: usize,
    /// Run sibling sub-transforms on the rayon pool (requires the `parallel` feature)
    pub parallel: bool,
    /// Sub-transforms shorter than this always run sequentially
    pub parallel_threshold: usize,
}

/// Default limb base: nine decimal digits per limb
pub const DEFAULT_LIMB_BASE: u32 = 1_000_000_000;

/// Default unroll threshold for the combine stage
pub const STATIC_LOOP_LIMIT: usize = 8;

impl Default for Options {
    fn default() -> Self {
        Self {
            places: 3,
            limb_base: DEFAULT_LIMB_BASE,
            series: SeriesPolicy::default(),
            static_loop_limit: STATIC_LOOP_LIMIT,
            radix_grouping: RadixGrouping::default(),
            max_generic_radix: 97,
            parallel: false,
            parallel_threshold: 1 << 14,
        }
    }
}

impl Options {
    pub fn guess_options(input_size: usize) -> Options {
        let mut options = Options::default();
        options.parallel = input_size >= 1 << 16;
        options
    }

    /// Checks the fields that cannot be clamped silently.
    ///
    /// # Errors
    ///
    /// [`FftError::InvalidLimbBase`] if `limb_base` is outside `[2, 10^9]`.
    pub fn validate(&self) -> Result<(), FftError> {
        check_limb_base(self.limb_base)
    }

    /// Same options with a different exact-arithmetic precision.
    pub fn with_places(mut self, places: usize) -> Self {
        self.places = places;
        self
    }

    /// Same options with a different unroll threshold. `0` disables unrolling.
    pub fn with_static_loop_limit(mut self, limit: usize) -> Self {
        self.static_loop_limit = limit;
        self
    }

    /// Same options with a different grouping of powers of two.
    pub fn with_radix_grouping(mut self, grouping: RadixGrouping) -> Self {
        self.radix_grouping = grouping;
        self
    }

    /// Same options with a different series termination policy.
    pub fn with_series(mut self, series: SeriesPolicy) -> Self {
        self.series = series;
        self
    }

    /// Same options with a different limb base. Values are clamped to `[2, 10^9]`.
    pub fn with_limb_base(mut self, base: u32) -> Self {
        self.limb_base = base.clamp(2, DEFAULT_LIMB_BASE);
        self
    }

    /// Same options with the given parallel fork-join settings.
    pub fn with_parallel(mut self, parallel: bool, threshold: usize) -> Self {
        self.parallel = parallel;
        self.parallel_threshold = threshold;
        self
    }
}

/// # Errors
///
/// [`FftError::InvalidLimbBase`] unless `2 <= base <= 10^9`.
pub(crate) fn check_limb_base(base: u32) -> Result<(), FftError> {
    if (2..=DEFAULT_LIMB_BASE).contains(&base) {
        Ok(())
    } else {
        Err(FftError::InvalidLimbBase(base))
    }
}

/// Termination rule of the sine/cosine series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SeriesPolicy {
    /// Sum until two successive partial sums agree to the requested number of places.
    ///
    /// Failing to settle within `max_steps` terms is a construction-time error.
    Accuracy { max_steps: usize },
    /// Sum exactly this many terms, regardless of how far they have converged.
    Terms(usize),
}

impl Default for SeriesPolicy {
    fn default() -> Self {
        SeriesPolicy::Accuracy { max_steps: 256 }
    }
}

/// The grouping of the prime factor 2 into larger butterflies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RadixGrouping {
    /// Use the prime factorization as is
    Primes,
    #[default]
    /// Pair factors of two into radix-4 stages
    Radix4,
    /// Triple factors of two into radix-8 stages, with a radix-4 or radix-2 remainder
    Radix8,
}

use std::fmt;
use std::io;
use std::str::FromStr;

/// Line search used by L-BFGS when no L1 penalty is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearchAlgorithm {
    /// More-Thuente (CRFsuite default)
    #[default]
    MoreThuente,
    BacktrackingArmijo,
    BacktrackingWolfe,
    BacktrackingStrongWolfe,
}

impl LineSearchAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MoreThuente => "MoreThuente",
            Self::BacktrackingArmijo => "BacktrackingArmijo",
            Self::BacktrackingWolfe => "BacktrackingWolfe",
            Self::BacktrackingStrongWolfe => "BacktrackingStrongWolfe",
        }
    }
}

impl FromStr for LineSearchAlgorithm {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MoreThuente" => Ok(Self::MoreThuente),
            "BacktrackingArmijo" => Ok(Self::BacktrackingArmijo),
            "BacktrackingWolfe" | "Backtracking" => Ok(Self::BacktrackingWolfe),
            "BacktrackingStrongWolfe" => Ok(Self::BacktrackingStrongWolfe),
            _ => Err(invalid(format!("unknown line search algorithm: {}", s))),
        }
    }
}

fn invalid<E: Into<Box<dyn std::error::Error + Send + Sync>>>(msg: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

fn parse<T: FromStr>(name: &str, value: &str) -> io::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid value for {}: {}", name, value)))
}

fn parse_bool(name: &str, value: &str) -> io::Result<bool> {
    match value.trim() {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        _ => Err(invalid(format!("invalid value for {}: {}", name, value))),
    }
}

/// Hyperparameters of L-BFGS training, named as in CRFsuite
///
/// Setters validate their input; the string interface (`set`/`get`)
/// accepts the CRFsuite parameter names.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerParams {
    c1: f64,
    c2: f64,
    feature_minfreq: f64,
    possible_states: bool,
    possible_transitions: bool,
    max_iterations: usize,
    num_memories: usize,
    epsilon: f64,
    period: usize,
    delta: f64,
    linesearch: LineSearchAlgorithm,
    max_linesearch: usize,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            c1: 0.0,
            c2: 1.0,
            feature_minfreq: 0.0,
            possible_states: false,
            possible_transitions: false,
            max_iterations: usize::MAX,
            num_memories: 6,
            epsilon: 1e-5,
            period: 10,
            delta: 1e-5,
            linesearch: LineSearchAlgorithm::default(),
            max_linesearch: 20,
        }
    }
}

/// Parameter names understood by [`TrainerParams::set`]
pub const PARAM_NAMES: &[&str] = &[
    "c1",
    "c2",
    "feature.minfreq",
    "feature.possible_states",
    "feature.possible_transitions",
    "max_iterations",
    "num_memories",
    "epsilon",
    "period",
    "delta",
    "linesearch",
    "max_linesearch",
];

impl TrainerParams {
    /// L1 penalty; a positive value switches the optimiser to OWL-QN
    pub fn c1(&self) -> f64 {
        self.c1
    }

    pub fn set_c1(&mut self, c1: f64) -> io::Result<()> {
        if c1 < 0.0 {
            return Err(invalid("c1 must be non-negative"));
        }
        self.c1 = c1;
        Ok(())
    }

    /// L2 penalty
    pub fn c2(&self) -> f64 {
        self.c2
    }

    pub fn set_c2(&mut self, c2: f64) -> io::Result<()> {
        if c2 < 0.0 {
            return Err(invalid("c2 must be non-negative"));
        }
        self.c2 = c2;
        Ok(())
    }

    pub fn feature_minfreq(&self) -> f64 {
        self.feature_minfreq
    }

    pub fn set_feature_minfreq(&mut self, minfreq: f64) -> io::Result<()> {
        if minfreq < 0.0 {
            return Err(invalid("feature.minfreq must be non-negative"));
        }
        self.feature_minfreq = minfreq;
        Ok(())
    }

    pub fn possible_states(&self) -> bool {
        self.possible_states
    }

    pub fn set_possible_states(&mut self, enabled: bool) {
        self.possible_states = enabled;
    }

    pub fn possible_transitions(&self) -> bool {
        self.possible_transitions
    }

    pub fn set_possible_transitions(&mut self, enabled: bool) {
        self.possible_transitions = enabled;
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) -> io::Result<()> {
        if max_iterations < 1 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        self.max_iterations = max_iterations;
        Ok(())
    }

    /// Number of L-BFGS corrections; stored and reported, liblbfgs always uses 6
    pub fn num_memories(&self) -> usize {
        self.num_memories
    }

    pub fn set_num_memories(&mut self, num_memories: usize) -> io::Result<()> {
        if num_memories < 1 {
            return Err(invalid("num_memories must be at least 1"));
        }
        self.num_memories = num_memories;
        Ok(())
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> io::Result<()> {
        if epsilon < 0.0 {
            return Err(invalid("epsilon must be non-negative"));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    /// Window for the delta-based stopping test; 0 disables it
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn set_period(&mut self, period: usize) {
        self.period = period;
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f64) -> io::Result<()> {
        if delta < 0.0 {
            return Err(invalid("delta must be non-negative"));
        }
        self.delta = delta;
        Ok(())
    }

    pub fn linesearch(&self) -> LineSearchAlgorithm {
        self.linesearch
    }

    pub fn set_linesearch(&mut self, linesearch: LineSearchAlgorithm) {
        self.linesearch = linesearch;
    }

    pub fn max_linesearch(&self) -> usize {
        self.max_linesearch
    }

    pub fn set_max_linesearch(&mut self, max_linesearch: usize) -> io::Result<()> {
        if max_linesearch == 0 {
            return Err(invalid("max_linesearch must be positive"));
        }
        self.max_linesearch = max_linesearch;
        Ok(())
    }

    /// Set L1 coefficient (builder pattern)
    pub fn with_c1(mut self, c1: f64) -> io::Result<Self> {
        self.set_c1(c1)?;
        Ok(self)
    }

    /// Set L2 coefficient (builder pattern)
    pub fn with_c2(mut self, c2: f64) -> io::Result<Self> {
        self.set_c2(c2)?;
        Ok(self)
    }

    /// Set minimum feature frequency (builder pattern)
    pub fn with_feature_minfreq(mut self, minfreq: f64) -> io::Result<Self> {
        self.set_feature_minfreq(minfreq)?;
        Ok(self)
    }

    /// Set maximum iterations (builder pattern)
    pub fn with_max_iterations(mut self, max_iterations: usize) -> io::Result<Self> {
        self.set_max_iterations(max_iterations)?;
        Ok(self)
    }

    /// Generate unobserved attribute/label features (builder pattern)
    pub fn with_possible_states(mut self, enabled: bool) -> Self {
        self.possible_states = enabled;
        self
    }

    /// Generate unobserved label transitions (builder pattern)
    pub fn with_possible_transitions(mut self, enabled: bool) -> Self {
        self.possible_transitions = enabled;
        self
    }

    /// Set a parameter by its CRFsuite name
    pub fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        match name {
            "c1" => self.set_c1(parse(name, value)?),
            "c2" => self.set_c2(parse(name, value)?),
            "feature.minfreq" => self.set_feature_minfreq(parse(name, value)?),
            "feature.possible_states" => {
                self.set_possible_states(parse_bool(name, value)?);
                Ok(())
            }
            "feature.possible_transitions" => {
                self.set_possible_transitions(parse_bool(name, value)?);
                Ok(())
            }
            "max_iterations" => self.set_max_iterations(parse(name, value)?),
            "num_memories" => self.set_num_memories(parse(name, value)?),
            "epsilon" => self.set_epsilon(parse(name, value)?),
            "period" => {
                self.set_period(parse(name, value)?);
                Ok(())
            }
            "delta" => self.set_delta(parse(name, value)?),
            "linesearch" => {
                self.set_linesearch(value.trim().parse()?);
                Ok(())
            }
            "max_linesearch" => self.set_max_linesearch(parse(name, value)?),
            _ => Err(invalid(format!("unknown parameter: {}", name))),
        }
    }

    /// Get a parameter by its CRFsuite name, formatted as CRFsuite would
    pub fn get(&self, name: &str) -> io::Result<String> {
        let flag = |b: bool| if b { "1" } else { "0" }.to_string();
        match name {
            "c1" => Ok(self.c1.to_string()),
            "c2" => Ok(self.c2.to_string()),
            "feature.minfreq" => Ok(self.feature_minfreq.to_string()),
            "feature.possible_states" => Ok(flag(self.possible_states)),
            "feature.possible_transitions" => Ok(flag(self.possible_transitions)),
            "max_iterations" => Ok(self.max_iterations.to_string()),
            "num_memories" => Ok(self.num_memories.to_string()),
            "epsilon" => Ok(self.epsilon.to_string()),
            "period" => Ok(self.period.to_string()),
            "delta" => Ok(self.delta.to_string()),
            "linesearch" => Ok(self.linesearch.as_str().to_string()),
            "max_linesearch" => Ok(self.max_linesearch.to_string()),
            _ => Err(invalid(format!("unknown parameter: {}", name))),
        }
    }
}

impl fmt::Display for TrainerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in PARAM_NAMES.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            // every listed name is known to `get`
            let value = self.get(name).map_err(|_| fmt::Error)?;
            write!(f, "'{}': '{}'", name, value)?;
        }
        f.write_str("}")
    }
}

/// The convergence schedule of the branch root-finder
///
/// The target tolerance starts tight and is doubled after every `relaxation_period`
/// iterations, so an ill-conditioned branch trades precision for termination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Convergence {
    pub(crate) initial_tolerance: f64,
    pub(crate) derivative_epsilon: f64,
    pub(crate) relaxation_period: usize,
}

impl Default for Convergence {
    fn default() -> Self {
        Self {
            initial_tolerance: 1e-14,
            derivative_epsilon: 1e-15,
            relaxation_period: 100,
        }
    }
}

impl Convergence {
    pub fn initial_tolerance(&self) -> f64 {
        self.initial_tolerance
    }

    /// Below this magnitude the Newton step is abandoned and the current iterate accepted
    pub fn derivative_epsilon(&self) -> f64 {
        self.derivative_epsilon
    }

    pub fn relaxation_period(&self) -> usize {
        self.relaxation_period
    }

    /// The tolerance in force once `iterations` Newton steps have been taken
    pub fn tolerance_after(&self, iterations: usize) -> f64 {
        let doublings = (iterations / self.relaxation_period).min(i32::MAX as usize) as i32;
        self.initial_tolerance * 2f64.powi(doublings)
    }
}

#[cfg(test)]
mod test {
    use super::Convergence;

    #[test]
    fn tolerance_doubles_every_relaxation_period() {
        let convergence = Convergence::default();
        assert_eq!(convergence.tolerance_after(0), 1e-14);
        assert_eq!(convergence.tolerance_after(99), 1e-14);
        assert_eq!(convergence.tolerance_after(100), 2e-14);
        assert_eq!(convergence.tolerance_after(350), 8e-14);
    }
}

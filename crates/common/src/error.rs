use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The target cannot be reached from the source.
    #[error("no path found from {from} to {to}")]
    NoPath { from: String, to: String },

    /// Relaxation did not converge after |V| - 1 passes.
    #[error("negative cycle detected")]
    NegativeCycle,

    /// A predecessor chain ended (or looped) before reaching where it should.
    /// Indicates an engine bug rather than a property of the input graph.
    #[error("path reconstruction failed: broken predecessor chain at {node}")]
    BrokenPathReconstruction { node: String },

    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),
}

impl Error {
    /// Builds a `NoPath` error, rendering both labels with `Debug`.
    pub fn no_path<N: std::fmt::Debug>(from: &N, to: &N) -> Self {
        Error::NoPath {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }

    pub fn broken_chain<N: std::fmt::Debug>(node: &N) -> Self {
        Error::BrokenPathReconstruction {
            node: format!("{:?}", node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_message_names_both_nodes() {
        let err = Error::no_path(&"A", &"C");
        assert_eq!(err.to_string(), "no path found from \"A\" to \"C\"");
    }

    #[test]
    fn negative_cycle_message() {
        assert_eq!(Error::NegativeCycle.to_string(), "negative cycle detected");
    }

    #[test]
    fn broken_chain_renders_integer_labels() {
        let err = Error::broken_chain(&7u32);
        assert_eq!(
            err.to_string(),
            "path reconstruction failed: broken predecessor chain at 7"
        );
    }
}

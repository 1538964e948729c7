use std::path::PathBuf;

/// Failures while resolving or validating the deployed program, all of
/// which abort the run.
#[derive(Debug)]
pub enum SetupError {
    /// The deploy artifact holding the program keypair could not be read,
    /// so the program id cannot be resolved.
    ProgramKeypairUnreadable { path: PathBuf, reason: String },
    /// No account exists at the program id; the program was never
    /// deployed to this cluster.
    ProgramNotDeployed,
    /// An account exists at the program id but is not executable.
    ProgramNotExecutable,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::ProgramKeypairUnreadable { path, reason } => write!(
                f,
                "Failed to read program keypair at '{}': {reason}. Deploy the program first",
                path.display()
            ),
            SetupError::ProgramNotDeployed => {
                write!(f, "Program needs to be built and deployed")
            }
            SetupError::ProgramNotExecutable => write!(f, "Program is not executable"),
        }
    }
}

impl std::error::Error for SetupError {}

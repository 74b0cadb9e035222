use std::fs::File;
use std::path::Path;
use std::process::Stdio;

use log::debug;
use tokio::process::Command;

use crate::types::{ExecError, Invocation, RawExecutionArtifact};

/// Run one planned invocation to completion.
///
/// stdout/stderr go straight into the invocation's output files, which are
/// truncated first so a rerun overwrites rather than appends. The call
/// awaits the child with no timeout; time limits belong to the external tool.
/// A nonzero exit status is data, not an error. Only a failure to launch the
/// program (or to open/read the capture files) is reported as `Err`.
pub async fn execute(
    invocation: &Invocation,
    working_directory: Option<&Path>,
) -> Result<RawExecutionArtifact, ExecError> {
    let outputs = &invocation.outputs;
    for path in [&outputs.stdout, &outputs.stderr] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let status = {
        // Files are owned by the Command and closed when this scope ends,
        // whether or not the spawn succeeds.
        let stdout_file = File::create(&outputs.stdout)?;
        let stderr_file = File::create(&outputs.stderr)?;

        let mut cmd = Command::new(&invocation.command.program);
        cmd.args(&invocation.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file))
            .stderr(Stdio::from(stderr_file))
            .kill_on_drop(true);
        if let Some(dir) = working_directory {
            cmd.current_dir(dir);
        }

        debug!("Running: {}", invocation.command.display());
        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: invocation.command.program.to_string_lossy().into_owned(),
            source,
        })?;
        child.wait().await?
    };

    let stdout = read_lossy(&outputs.stdout).await?;
    let stderr = read_lossy(&outputs.stderr).await?;
    let exit_code = status.code().map(i64::from);
    debug!("{} exited with {:?}", invocation.label, exit_code);

    Ok(RawExecutionArtifact {
        label: invocation.label.clone(),
        stdout,
        stderr,
        exit_code,
        outputs: outputs.clone(),
    })
}

async fn read_lossy(path: &Path) -> Result<String, ExecError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

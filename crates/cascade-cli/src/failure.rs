//! Terminal failure reporting.

/// Print one fatal error, as a workflow command under GitHub Actions.
pub fn report(error: &anyhow::Error) {
    let in_actions = std::env::var_os("GITHUB_ACTIONS").is_some_and(|v| v == "true");
    eprintln!("{}", render(error, in_actions));
}

fn render(error: &anyhow::Error, in_actions: bool) -> String {
    let message = format!("{error:#}");
    if in_actions {
        format!("::error::{}", escape_workflow_data(&message))
    } else {
        format!("cascade error: {message}")
    }
}

/// Workflow command data must not contain raw `%`, CR, or LF.
fn escape_workflow_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

use anyhow::Context as _;

/// Pretty JSON for `--json` output: calculations, history records and the
/// home screen summary.
pub fn render_json(value: &(impl serde::Serialize + ?Sized)) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("serialize JSON output")
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &(impl serde::Serialize + ?Sized)) -> anyhow::Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

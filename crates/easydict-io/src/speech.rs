use anyhow::Context;
use tokio::process::Command;

/// PowerShell one-liner driving `System.Speech`
fn powershell_script(text: &str) -> String {
    format!(
        "Add-Type -AssemblyName System.Speech; \
         $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
         $synth.Speak('{}');",
        text.replace('\'', "''").replace(['\r', '\n'], " ")
    )
}

/// Start reading `text` aloud. Returns once the speech process is spawned.
pub async fn speak(text: &str) -> anyhow::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("powershell");
        command.args(["-NoProfile", "-Command", &powershell_script(text)]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("say");
        command.arg(text);
        command
    } else {
        anyhow::bail!("TTS is only supported on Windows and macOS");
    };

    command.kill_on_drop(false).spawn().context("Failed to start speech process")?;
    tracing::debug!("Speaking {} chars", text.len());
    Ok(())
}

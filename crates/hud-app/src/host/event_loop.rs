//! The host's single-threaded event loop.
//!
//! Waits on the next stdin line, a finished feature lookup, or the
//! earliest bus retry, applies it, then writes whatever the host produced
//! as JSON lines on stdout.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use hud_common::Result;
use hud_config::HudConfig;
use hud_router::LookupService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use super::protocol::encode_output;
use super::Hud;

pub async fn run(config: HudConfig, lookup: Arc<dyn LookupService>) -> Result<()> {
    let mut hud = Hud::start(&config, lookup).await;
    drive(
        &mut hud,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

async fn drive<R, W>(hud: &mut Hud, mut input: R, mut out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    write_outputs(hud, &mut out).await?;
    info!("host ready");

    loop {
        let deadline = hud.next_retry_at();
        tokio::select! {
            line = read_line(&mut input, &mut buf) => match line? {
                Some(line) => hud.handle_line(&line, Instant::now()),
                None => {
                    info!(lookups_in_flight = hud.lookups_in_flight(), "input closed, shutting down");
                    break;
                }
            },
            Some(done) = hud.next_lookup() => hud.finish_lookup(done),
            _ = sleep_until(deadline) => hud.fire_retries(Instant::now()),
        }
        write_outputs(hud, &mut out).await?;
    }

    Ok(())
}

/// Read the next newline-terminated line, `None` at end of input.
///
/// A line that is not valid UTF-8 is logged and comes back empty, which
/// the host skips. Partial reads stay in `buf`, so a read interrupted by
/// another `select!` branch resumes where it stopped.
async fn read_line<R>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let n = input.read_until(b'\n', buf).await?;
    if n == 0 && buf.is_empty() {
        return Ok(None);
    }

    let line = match std::str::from_utf8(buf) {
        Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
        Err(e) => {
            warn!(error = %e, line_len = buf.len(), "input line rejected: not UTF-8");
            String::new()
        }
    };
    buf.clear();
    Ok(Some(line))
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending::<()>().await,
    }
}

async fn write_outputs<W>(hud: &mut Hud, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let outputs = hud.drain_outputs();
    if outputs.is_empty() {
        return Ok(());
    }
    for output in &outputs {
        if let Some(line) = encode_output(output) {
            out.write_all(line.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
    }
    out.flush().await?;
    Ok(())
}

use anyhow::Result;
use issuechat_core::Config;

/// Launch the web UI and block until Ctrl-C.
pub fn run(config: Config, port: u16, no_open: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("issuechat UI → http://localhost:{actual_port}");

        tokio::select! {
            res = issuechat_server::serve_on(config, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}

pub mod auth;
pub mod config;
pub mod feedback;
pub mod session;
pub mod suggest;

/// One-shot commands run their async work on a fresh runtime.
pub(crate) fn block_on<F, T>(fut: F) -> Result<T, Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<T, Box<dyn std::error::Error>>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(fut)
}

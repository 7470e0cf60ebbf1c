use async_trait::async_trait;

/// A synchronous tool. The deserialized value *is* the call's typed
/// arguments; `apply` consumes a context and produces the result text.
pub trait Tool {
    type Context: Send + 'static;
    fn name(&self) -> &'static str;
    fn apply(&self, context: Self::Context) -> String;
}

/// A tool that performs I/O. Failures surface as `Err` and are rendered
/// into the conversation by the driver, never propagated further.
#[async_trait]
pub trait AsyncTool: Send + Sync {
    type Context: Send + 'static;
    fn name(&self) -> &'static str;
    async fn apply(&self, context: Self::Context) -> anyhow::Result<String>;
}

/// Lifts a synchronous tool into an async toolset.
pub struct AsyncToolWrapper<T>(pub T);

#[async_trait]
impl<T> AsyncTool for AsyncToolWrapper<T>
where
    T: Tool + Send + Sync,
{
    type Context = T::Context;

    fn name(&self) -> &'static str {
        self.0.name()
    }

    async fn apply(&self, context: Self::Context) -> anyhow::Result<String> {
        Ok(self.0.apply(context))
    }
}

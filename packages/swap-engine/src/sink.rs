use log::error;

/// Where swap-flow failures get reported. The UI layer wires its telemetry
/// in here; the engine never swallows a failure without reporting it first.
pub trait ExceptionSink {
    fn report(&self, err: &dyn std::error::Error);
}

/// Default sink: the application log.
#[derive(Debug, Default)]
pub struct LogSink;

impl ExceptionSink for LogSink {
    fn report(&self, err: &dyn std::error::Error) {
        error!("swap flow error: {err}");
    }
}

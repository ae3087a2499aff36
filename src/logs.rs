// ABOUTME: Streams a pod's log lines to the output sink.
// ABOUTME: Used by the logs command; reads through PodOps so it works against any cluster.

use futures::StreamExt;

use crate::cluster::{ClusterError, LogOptions, PodOps};
use crate::output::Output;
use crate::types::{Namespace, PodName};

/// Write every log line of `pod` to `output`, returning the number of lines.
///
/// With `opts.follow` this only returns once the server closes the stream.
pub async fn stream_logs<C: PodOps + ?Sized>(
    cluster: &C,
    namespace: &Namespace,
    pod: &PodName,
    opts: &LogOptions,
    output: &Output,
) -> Result<usize, ClusterError> {
    tracing::debug!(%namespace, %pod, follow = opts.follow, "streaming pod logs");
    let mut lines = cluster.pod_logs(namespace, pod, opts).await?;

    let mut count = 0;
    while let Some(line) = lines.next().await {
        output.line(&line?);
        count += 1;
    }
    Ok(count)
}

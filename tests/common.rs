/// Synthetic Siemens log builders shared by the integration tests.
use physlog::ChannelKind;
use serde_json::{json, Value};

#[allow(unused)]
/// Device samples per 20 ms grid step at the default decimation.
pub const PER_STEP: usize = 8;

#[allow(unused)]
/// Body tokens for plain integer samples.
pub fn sample_tokens(samples: &[i64]) -> Vec<String> {
    samples.iter().map(|v| v.to_string()).collect()
}

#[allow(unused)]
/// Insert an annotation run after every `every` tokens.
pub fn annotate(tokens: Vec<String>, every: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len() + tokens.len() / every * 4);
    for (i, t) in tokens.into_iter().enumerate() {
        if i > 0 && i % every == 0 {
            out.extend(["5002", "LOGVERSION", "102", "6002"].map(String::from));
        }
        out.push(t);
    }
    out
}

#[allow(unused)]
/// Full log text: parameter blocks up to the channel's data-start marker,
/// the body, the trailing marker, and a footer with MDH start/stop times.
pub fn channel_log(channel: ChannelKind, body: &[String], start_ms: i64, stop_ms: i64) -> String {
    let mut line: Vec<String> = Vec::new();
    for block in 0..channel.data_start_occurrence() {
        line.extend(["1", "2", "40", "280"].map(String::from));
        line.push(format!("{block}"));
        line.push("6002".into());
    }
    line.extend_from_slice(body);
    line.push("5003".into());
    format!(
        "{}\nECG  Freq Per: 0 0\nPULS Freq Per: 72 823\nRESP Freq Per: 14 4285\n\
         LogStartMDHTime:  {start_ms}\nLogStopMDHTime:   {stop_ms}\n\
         LogStartMPCUTime: {start_ms}\nLogStopMPCUTime:  {stop_ms}\n",
        line.join(" ")
    )
}

#[allow(unused)]
/// Number of device samples covering `[start, stop]` on the 20 ms grid.
pub fn device_samples(start_ms: i64, stop_ms: i64) -> usize {
    ((stop_ms - start_ms) / 20 + 1) as usize * PER_STEP
}

#[allow(unused)]
/// `base, base+1, …`: a linear trace that the zero-phase lowpass preserves.
/// Keep `base` above the reserved marker values.
pub fn ramp(n: usize, base: i64) -> Vec<i64> {
    (0..n as i64).map(|i| base + i).collect()
}

#[allow(unused)]
pub fn sidecar(acquisition_time: &str) -> Value {
    json!({
        "Modality": "MR",
        "RepetitionTime": 2.0,
        "AcquisitionTime": acquisition_time,
    })
}

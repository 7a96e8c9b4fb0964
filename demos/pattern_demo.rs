//! Pattern Demo: random signatures, detection, explanations and a
//! threshold sweep.
//!
//! 1. Store 30 random signatures with random metadata
//! 2. Detect 10 random samples and explain the top 2 matches of each
//! 3. Sweep the match threshold and report the detection rate
//! 4. Print the detector summary
//!
//! Run: cargo run --example pattern_demo

use serde_json::json;
use tokenscan::events::{init_tracing, log_event, LogOptions};
use tokenscan::kernel::{SampleGenerator, DEFAULT_SIGNATURE_LEN};
use tokenscan::memory::PatternDetector;

fn main() -> tokenscan::Result<()> {
    init_tracing();

    let mut gen = SampleGenerator::for_label("pattern-demo", 0);
    let mut detector = PatternDetector::new("ai-risk-engine-v2");

    for _ in 0..30 {
        detector.add(gen.vector(DEFAULT_SIGNATURE_LEN), gen.metadata());
    }

    let samples = gen.vectors(10, DEFAULT_SIGNATURE_LEN);

    // =========================================================================
    // Detection results
    // =========================================================================

    println!("Detection Results:");
    println!("{:>6}  {:>7}  explanation", "sample", "matched");
    for (idx, vec) in samples.iter().enumerate() {
        let matched = detector.detect(vec)?;
        let explanation = detector.explain_top_matches(vec, 2)?;
        let top: Vec<String> = explanation
            .iter()
            .map(|m| format!("{}={:.3}", m.id, m.score))
            .collect();
        println!("{:>6}  {:>7}  {}", idx, matched, top.join(", "));
    }

    // =========================================================================
    // Threshold sweep
    // =========================================================================

    println!();
    println!("Threshold Responses:");
    println!("{:>9}  {:>13}", "threshold", "detectionRate");
    for threshold in [0.5, 0.6, 0.7, 0.8, 0.9] {
        detector.set_threshold(threshold);
        let mut hits = 0usize;
        for vec in &samples {
            if detector.detect(vec)? {
                hits += 1;
            }
        }
        let rate = hits as f64 / samples.len() as f64;
        println!("{:>9.1}  {:>13.2}", threshold, rate);
        log_event(
            "threshold_sweep",
            &json!({ "threshold": threshold, "detectionRate": rate }),
            &LogOptions::default(),
        );
    }

    // =========================================================================
    // Summary
    // =========================================================================

    println!();
    println!("Summary:");
    println!("{}", serde_json::to_string_pretty(&detector.summary())?);

    Ok(())
}

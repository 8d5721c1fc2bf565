//! The orchestration pipeline: a deterministic state machine over the
//! five analyzers.
//!
//! Stages: scoring, ambiguity check, context check, rewrite decision,
//! decomposition, per-sub-task intent, assembly. Two operating modes
//! order these stages differently: strict mode may terminate early with a
//! fixed clarification message, always-answer mode never rejects.

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use lumen_core::{
    AmbiguityReport, Disposition, Error, PipelineMode, PipelineResult, Request, Result,
    ScoreReport, SubTask,
};

use crate::analyzer::{
    AmbiguityDetector, ContextDetector, Decomposer, IntentClassifier, LlmAmbiguityDetector,
    LlmContextDetector, LlmDecomposer, LlmIntentClassifier, LlmScorer, RuleAmbiguityDetector,
    RuleContextDetector, RuleDecomposer, RuleIntentClassifier, RuleScorer, Scorer,
};
use crate::invoker::Invoker;

/// Clarification returned by strict mode for unclear or too-vague
/// requests. A valid terminal output, not an error.
pub const CLARIFY_VAGUE: &str = "Your request seems unclear or too vague. \
     Please specify the topic, the desired format, or the expected output type.";

/// Clarification returned by strict mode for broad or ambiguous requests.
/// A valid terminal output, not an error.
pub const CLARIFY_AMBIGUOUS: &str = "Your request is too broad or ambiguous. \
     Please clarify the domain you are asking about.";

/// Marker line prefixed to the output of a rewrite-triggered run.
pub const REWRITE_MARKER: &str = "[LLM Rewrite Triggered]";

/// Strict mode rejects requests scoring at or below this total.
const STRICT_REJECT_THRESHOLD: u8 = 3;

/// Strict mode rewrites requests scoring below this total.
const STRICT_REWRITE_THRESHOLD: u8 = 6;

/// Always-answer mode rewrites requests scoring below this total.
const ALWAYS_REWRITE_THRESHOLD: u8 = 10;

/// The prompt-optimization pipeline.
///
/// Holds one implementation of each analyzer capability, selected at
/// construction time; orchestration never branches on which backend is
/// installed. The optional rewriter is the only external dependency of a
/// rules-backed pipeline; without it the rewrite stage passes text
/// through unchanged.
pub struct Pipeline {
    /// Quality scorer.
    scorer: Box<dyn Scorer>,
    /// Ambiguity detector.
    ambiguity: Box<dyn AmbiguityDetector>,
    /// Context-dependency detector.
    context: Box<dyn ContextDetector>,
    /// Intent classifier, invoked once per sub-task.
    intent: Box<dyn IntentClassifier>,
    /// Request decomposer.
    decomposer: Box<dyn Decomposer>,
    /// Rate-limited access to the rewrite capability, when available.
    rewriter: Option<Arc<Invoker>>,
    /// Operating mode.
    mode: PipelineMode,
}

impl Pipeline {
    /// Builds a pipeline with the rule-based analyzer family and no
    /// rewriter.
    pub fn rules(mode: PipelineMode) -> Self {
        Self {
            scorer: Box::new(RuleScorer),
            ambiguity: Box::new(RuleAmbiguityDetector),
            context: Box::new(RuleContextDetector),
            intent: Box::new(RuleIntentClassifier),
            decomposer: Box::new(RuleDecomposer),
            rewriter: None,
            mode,
        }
    }

    /// Builds a pipeline with the LLM-backed analyzer family, sharing one
    /// invoker for analysis and rewriting.
    pub fn llm(invoker: Arc<Invoker>, mode: PipelineMode) -> Self {
        Self {
            scorer: Box::new(LlmScorer::new(Arc::clone(&invoker))),
            ambiguity: Box::new(LlmAmbiguityDetector::new(Arc::clone(&invoker))),
            context: Box::new(LlmContextDetector::new(Arc::clone(&invoker))),
            intent: Box::new(LlmIntentClassifier::new(Arc::clone(&invoker))),
            decomposer: Box::new(LlmDecomposer::new(Arc::clone(&invoker))),
            rewriter: Some(invoker),
            mode,
        }
    }

    /// Attaches a rewriter to an otherwise rule-based pipeline.
    #[must_use]
    pub fn with_rewriter(mut self, invoker: Arc<Invoker>) -> Self {
        self.rewriter = Some(invoker);
        self
    }

    /// Optimizes a raw request, returning just the output string.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`Pipeline::run`].
    pub async fn optimize(&self, raw: &str, prior_context: Option<&str>) -> Result<String> {
        let mut request = Request::new(raw);
        if let Some(context) = prior_context {
            request = request.with_prior_context(context);
        }
        Ok(self.run(&request).await?.output)
    }

    /// Runs one full pipeline pass over the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for an empty request in always-answer
    /// mode, and propagates external-call failures from the LLM-backed
    /// analyzers. The strict-mode clarification messages are *not*
    /// errors; they are valid terminal outputs.
    pub async fn run(&self, request: &Request) -> Result<PipelineResult> {
        match self.mode {
            PipelineMode::Strict => self.run_strict(request).await,
            PipelineMode::AlwaysAnswer => self.run_always(request).await,
        }
    }

    /// Strict ordering: context, scoring (early exit), ambiguity (early
    /// exit), rewrite decision, decomposition, per-sub-task intent,
    /// assembly.
    async fn run_strict(&self, request: &Request) -> Result<PipelineResult> {
        if request.is_empty() {
            // An empty request scores zero, which lands below the reject
            // threshold.
            return Ok(clarification(CLARIFY_VAGUE, ScoreReport::zero(), None, false));
        }
        let started = Instant::now();

        let mut working = request.text.trim().to_owned();
        let mut context_attached = false;
        if let Some(prior) = request.prior_context.as_deref() {
            let context_report = self.context.detect(&working).await?;
            if context_report.needs_context {
                tracing::debug!(reason = %context_report.reason, "attaching prior context");
                working = attach_context(prior, &working);
                context_attached = true;
            }
        }

        let score = self.scorer.score(&working).await?;
        tracing::debug!(total = score.total, "scoring complete");
        if score.total <= STRICT_REJECT_THRESHOLD {
            return Ok(clarification(CLARIFY_VAGUE, score, None, context_attached));
        }

        let ambiguity = self.ambiguity.detect(&working).await?;
        if ambiguity.is_ambiguous {
            return Ok(clarification(
                CLARIFY_AMBIGUOUS,
                score,
                Some(ambiguity),
                context_attached,
            ));
        }

        // The ambiguity half of this trigger is always false after the
        // early exit above; it stays in the expression because the
        // rewrite decision is specified as score-or-ambiguity.
        let needs_rewrite =
            score.total < STRICT_REWRITE_THRESHOLD || ambiguity.is_ambiguous;
        let (working, rewrite_applied) = self.rewrite_if_needed(working, needs_rewrite).await?;

        let fragments = self.decomposer.decompose(&working).await?;
        let mut subtasks = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let intent = self.intent.classify(&fragment).await?;
            subtasks.push(SubTask {
                text: fragment,
                intent,
            });
        }

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            subtask_count = subtasks.len(),
            "analysis complete"
        );
        Ok(PipelineResult {
            output: assemble(&subtasks, &score, rewrite_applied),
            disposition: Disposition::Optimized,
            score,
            ambiguity: Some(ambiguity),
            rewrite_applied,
            context_attached,
        })
    }

    /// Always-answer ordering: scoring, ambiguity, and context run
    /// concurrently, context attaches afterward, and the pipeline never
    /// rejects.
    async fn run_always(&self, request: &Request) -> Result<PipelineResult> {
        if request.is_empty() {
            // This mode has no clarification terminal, so an empty
            // request is an operational failure.
            return Err(Error::EmptyInput);
        }
        let started = Instant::now();

        let text = request.text.trim();
        let (score, ambiguity, context_report) = tokio::join!(
            self.scorer.score(text),
            self.ambiguity.detect(text),
            self.context.detect(text),
        );
        let score = score?;
        let ambiguity = ambiguity?;
        let context_report = context_report?;
        tracing::debug!(
            total = score.total,
            is_ambiguous = ambiguity.is_ambiguous,
            needs_context = context_report.needs_context,
            "concurrent analysis complete"
        );

        let mut working = text.to_owned();
        let mut context_attached = false;
        if let Some(prior) = request.prior_context.as_deref() {
            if context_report.needs_context {
                working = attach_context(prior, &working);
                context_attached = true;
            }
        }

        let needs_rewrite =
            score.total < ALWAYS_REWRITE_THRESHOLD || ambiguity.is_ambiguous;
        let (working, rewrite_applied) = self.rewrite_if_needed(working, needs_rewrite).await?;

        let fragments = self.decomposer.decompose(&working).await?;
        // Per-sub-task classification fans out; the invoker gate bounds
        // how many external calls are actually in flight.
        let reports = try_join_all(
            fragments
                .iter()
                .map(|fragment| self.intent.classify(fragment)),
        )
        .await?;
        let subtasks: Vec<SubTask> = fragments
            .into_iter()
            .zip(reports)
            .map(|(text, intent)| SubTask { text, intent })
            .collect();

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            subtask_count = subtasks.len(),
            "analysis complete"
        );
        Ok(PipelineResult {
            output: assemble(&subtasks, &score, rewrite_applied),
            disposition: Disposition::Optimized,
            score,
            ambiguity: Some(ambiguity),
            rewrite_applied,
            context_attached,
        })
    }

    /// Applies the rewrite step when triggered and a rewriter is
    /// installed; otherwise the text passes through unchanged.
    async fn rewrite_if_needed(&self, working: String, triggered: bool) -> Result<(String, bool)> {
        if !triggered {
            return Ok((working, false));
        }
        match &self.rewriter {
            Some(invoker) => {
                tracing::info!("rewrite triggered, improving request clarity");
                let rewritten = invoker.rewrite(&working).await?;
                Ok((rewritten, true))
            }
            None => Ok((working, false)),
        }
    }
}

/// Formats the context-augmented working text.
fn attach_context(prior: &str, text: &str) -> String {
    format!("Considering the previous context: {prior}. Now perform: {text}")
}

/// Builds the terminal result for a strict-mode clarification ask.
fn clarification(
    message: &str,
    score: ScoreReport,
    ambiguity: Option<AmbiguityReport>,
    context_attached: bool,
) -> PipelineResult {
    PipelineResult {
        output: message.to_owned(),
        disposition: Disposition::NeedsClarification,
        score,
        ambiguity,
        rewrite_applied: false,
        context_attached,
    }
}

/// Assembles the final output: optional rewrite marker, one block per
/// sub-task in decomposition order, then the quality score.
fn assemble(subtasks: &[SubTask], score: &ScoreReport, rewrite_applied: bool) -> String {
    let mut output = String::new();
    if rewrite_applied {
        output.push_str(REWRITE_MARKER);
        output.push_str("\n\n");
    }
    for (index, task) in subtasks.iter().enumerate() {
        output.push_str(&format!("## Sub-Task {}: {}\n", index + 1, task.text));
        output.push_str(&format!("   Intent: {}\n", task.intent.primary));
        output.push_str("   Instructions:\n");
        for instruction in &task.intent.instructions {
            output.push_str(&format!("   - {instruction}\n"));
        }
        output.push('\n');
    }
    output.push_str(&format!("[Quality Score: {}/15]", score.total));
    output
}

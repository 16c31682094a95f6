//! Run Voting use case
//!
//! Runs the token, dependency and entity pipelines of the voting engine
//! concurrently and assembles the reconciled result.

use crate::ports::voting_observer::{NoVotingObserver, VotingObserver};
use nlp_quorum_domain::{
    AgreementCounts, AnnotationCategory, CategoryVote, Dependency, DomainError, Entity,
    ProcessorOutput, Token, VotingConfig, VotingEngine, VotingResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during a voting run
#[derive(Error, Debug)]
pub enum RunVotingError {
    #[error("Invalid voting configuration: {0}")]
    InvalidConfig(#[from] DomainError),

    #[error("{category} pipeline failed: {message}")]
    PipelineFailed {
        category: AnnotationCategory,
        message: String,
    },
}

/// Input for the RunVoting use case
#[derive(Debug, Clone)]
pub struct RunVotingInput {
    /// Processor outputs in the order they were supplied
    pub outputs: Vec<ProcessorOutput>,
    /// Run the three categories on blocking worker threads
    pub parallel: bool,
}

impl RunVotingInput {
    pub fn new(outputs: Vec<ProcessorOutput>) -> Self {
        Self {
            outputs,
            parallel: true,
        }
    }

    /// Run all categories on the calling task instead
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Outcome of one category pipeline
enum CategoryOutcome {
    Tokens(CategoryVote<Token>),
    Dependencies(CategoryVote<Dependency>),
    Entities(CategoryVote<Entity>),
}

impl CategoryOutcome {
    fn counts(&self) -> AgreementCounts {
        match self {
            CategoryOutcome::Tokens(vote) => vote.counts(),
            CategoryOutcome::Dependencies(vote) => vote.counts(),
            CategoryOutcome::Entities(vote) => vote.counts(),
        }
    }
}

/// Use case for reconciling a batch of processor outputs
pub struct RunVotingUseCase {
    engine: Arc<VotingEngine>,
}

impl RunVotingUseCase {
    /// Build the engine; configuration errors surface here, before any input is read
    pub fn new(config: VotingConfig) -> Result<Self, RunVotingError> {
        Ok(Self::from_engine(Arc::new(VotingEngine::new(config)?)))
    }

    pub fn from_engine(engine: Arc<VotingEngine>) -> Self {
        Self { engine }
    }

    pub fn config(&self) -> &VotingConfig {
        self.engine.config()
    }

    /// Execute the use case with the default (no-op) observer
    pub async fn execute(&self, input: RunVotingInput) -> Result<VotingResult, RunVotingError> {
        self.execute_with_observer(input, &NoVotingObserver).await
    }

    /// Execute the use case, reporting events to `observer`
    pub async fn execute_with_observer(
        &self,
        input: RunVotingInput,
        observer: &dyn VotingObserver,
    ) -> Result<VotingResult, RunVotingError> {
        let sources: Vec<String> = input
            .outputs
            .iter()
            .map(|o| o.source_name.clone())
            .collect();
        let min_agreement = self.engine.config().min_agreement;

        info!(
            "Starting voting over {} processor outputs (quorum {})",
            sources.len(),
            min_agreement
        );
        if sources.len() < min_agreement {
            warn!(
                "Only {} outputs supplied for a quorum of {}; nothing can be agreed",
                sources.len(),
                min_agreement
            );
        }
        observer.on_run_start(&sources);

        let outputs = Arc::new(input.outputs);
        let outcomes = if input.parallel {
            self.vote_parallel(&outputs, observer).await?
        } else {
            self.vote_sequential(&outputs, observer)
        };

        let mut tokens = CategoryVote::default();
        let mut dependencies = CategoryVote::default();
        let mut entities = CategoryVote::default();
        for outcome in outcomes {
            match outcome {
                CategoryOutcome::Tokens(vote) => tokens = vote,
                CategoryOutcome::Dependencies(vote) => dependencies = vote,
                CategoryOutcome::Entities(vote) => entities = vote,
            }
        }

        let result = VotingEngine::assemble(&outputs, tokens, dependencies, entities);
        for skipped in &result.skipped {
            warn!(
                "Skipped {} #{} from {}: {}",
                skipped.category, skipped.position, skipped.source, skipped.reason
            );
            observer.on_annotation_skipped(skipped);
        }

        info!(
            "Voting complete: {} agreed, {} disagreed, score {:.3}",
            result.num_agreements, result.num_disagreements, result.agreement_score
        );
        observer.on_run_complete(&result);
        Ok(result)
    }

    /// Dispatch each category to a blocking worker and collect them as they finish
    async fn vote_parallel(
        &self,
        outputs: &Arc<Vec<ProcessorOutput>>,
        observer: &dyn VotingObserver,
    ) -> Result<Vec<CategoryOutcome>, RunVotingError> {
        let mut join_set = JoinSet::new();
        let mut categories = HashMap::new();

        for category in AnnotationCategory::all() {
            observer.on_category_start(category);
            let engine = Arc::clone(&self.engine);
            let outputs = Arc::clone(outputs);

            let handle = join_set.spawn_blocking(move || {
                (category, Self::vote_category(&engine, &outputs, category))
            });
            categories.insert(handle.id(), category);
        }

        let mut outcomes = Vec::with_capacity(3);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((category, outcome)) => {
                    let counts = outcome.counts();
                    debug!(
                        "{} pipeline: {} agreed, {} disagreed",
                        category, counts.agreed, counts.disagreed
                    );
                    observer.on_category_complete(category, counts);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    join_set.abort_all();
                    return Err(RunVotingError::PipelineFailed {
                        category: categories
                            .get(&e.id())
                            .copied()
                            .unwrap_or(AnnotationCategory::Token),
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    fn vote_sequential(
        &self,
        outputs: &[ProcessorOutput],
        observer: &dyn VotingObserver,
    ) -> Vec<CategoryOutcome> {
        AnnotationCategory::all()
            .into_iter()
            .map(|category| {
                observer.on_category_start(category);
                let outcome = Self::vote_category(&self.engine, outputs, category);
                let counts = outcome.counts();
                debug!(
                    "{} pipeline: {} agreed, {} disagreed",
                    category, counts.agreed, counts.disagreed
                );
                observer.on_category_complete(category, counts);
                outcome
            })
            .collect()
    }

    fn vote_category(
        engine: &VotingEngine,
        outputs: &[ProcessorOutput],
        category: AnnotationCategory,
    ) -> CategoryOutcome {
        match category {
            AnnotationCategory::Token => CategoryOutcome::Tokens(engine.vote_tokens(outputs)),
            AnnotationCategory::Dependency => {
                CategoryOutcome::Dependencies(engine.vote_dependencies(outputs))
            }
            AnnotationCategory::Entity => CategoryOutcome::Entities(engine.vote_entities(outputs)),
        }
    }
}

use crate::facts::{FactFetcher, FactOptions};
use crate::prelude::{eprintln, println, *};
use crate::server::Policy;
use numclass_core::classify::{classify, ClassificationResult};
use numclass_core::facts::fallback_fact;
use numclass_core::input::{parse_number, ValidationPolicy};

#[derive(Debug, clap::Args)]
pub struct ClassifyOptions {
    /// Number to classify
    pub number: String,

    /// Which inputs are accepted
    #[arg(long, env = "NUMCLASS_POLICY", default_value = "permissive")]
    pub policy: Policy,

    /// Skip the facts service and use the fallback fact
    #[arg(long)]
    pub offline: bool,

    #[clap(flatten)]
    pub facts: FactOptions,
}

/// Classify a single number and print the result as JSON
pub async fn run(options: ClassifyOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Validation policy: {:?}", options.policy);
        if !options.offline {
            eprintln!("Facts service: {}", options.facts.facts_url);
        }
    }

    let result = classify_data(&options).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Parse, look up the fact and classify without printing
pub async fn classify_data(options: &ClassifyOptions) -> Result<ClassificationResult> {
    let policy: ValidationPolicy = options.policy.into();
    let number = parse_number(&options.number, policy)
        .map_err(|e| eyre!("{}: {:?}", e, e.raw()))?;

    let fun_fact = if options.offline {
        fallback_fact(number)
    } else {
        FactFetcher::from_options(&options.facts)?
            .fact_for(number)
            .await
    };

    Ok(classify(number, fun_fact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use numclass_core::classify::Property;

    fn options(number: &str, policy: Policy) -> ClassifyOptions {
        ClassifyOptions {
            number: number.to_string(),
            policy,
            offline: true,
            facts: FactOptions {
                facts_url: "http://127.0.0.1:1".to_string(),
                fact_timeout: 1,
            },
        }
    }

    #[tokio::test]
    async fn classify_data_offline_uses_fallback() {
        let result = classify_data(&options("6", Policy::Permissive))
            .await
            .unwrap();

        assert!(result.is_perfect);
        assert_eq!(result.properties, vec![Property::Even]);
        assert_eq!(result.fun_fact, "6 is a number.");
    }

    #[tokio::test]
    async fn classify_data_rejects_invalid_input() {
        let err = classify_data(&options("twelve", Policy::Strict))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid number format: \"twelve\"");
    }

    #[tokio::test]
    async fn classify_data_strict_rejects_negative() {
        let err = classify_data(&options("-6", Policy::Strict))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Negative numbers are not allowed: \"-6\"");
    }
}

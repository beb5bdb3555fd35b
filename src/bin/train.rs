use neurons::algorithm::{Algorithm, Cost};
use neurons::algorithms::{ClassificationError, GradientDescentPatch};
use neurons::example::{Example, ExampleSet, Examples};
use neurons::feed_forward::Network;
use neurons::report::{log_reporter, Subscription};
use neurons::trainer::Trainer;

use rand::Rng;
use rand_distr::StandardNormal;
use serde_json::json;

/// Points near the unit circle, classified by whether they lie in the first
/// or third quadrant.
fn generate_data(num_samples: usize) -> Vec<Example> {
    let mut rng = rand::thread_rng();
    let mut data = Vec::new();
    for _ in 0..num_samples {
        let theta = rng.gen_range(0.0..2.0 * std::f64::consts::PI);
        let dx = 0.1 * rng.sample::<f64, _>(StandardNormal);
        let dy = 0.1 * rng.sample::<f64, _>(StandardNormal);
        let point = vec![theta.cos() + dx, theta.sin() + dy];
        let class = if point[0] * point[1] > 0.0 {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        };
        data.push(Example::new(point, class));
    }
    data
}

fn score(set_name: &str, network: &Network, test_data: ExampleSet) -> neurons::Result<()> {
    let total = test_data.len();
    let mut classification = ClassificationError::new();
    classification.set_network(network);
    classification.set_examples(test_data);
    let error = classification.run()?;
    println!(
        "{} set results: {} of {} correct",
        set_name,
        ((1.0 - error) * total as f64).round(),
        total
    );
    Ok(())
}

fn main() -> neurons::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut examples = Examples::new(generate_data(1_200));
    let training_data = examples.get_set("training", 1_000.0);
    let test_data = examples.get_set("test", 200.0);

    let result = Trainer::new(&Network::new(&[2, 5, 5, 2])?)
        .cost_options(json!({ "regularization": 0.001 }))
        .derivative_options(json!({ "regularization": 0.001 }))
        .optimizer_options(GradientDescentPatch {
            learning_rate: Some(2.0),
            iterations: Some(3_000),
            target_error: Some(0.1),
            report_frequency: Some(100),
            ..Default::default()
        })
        .reporter(Subscription::All, log_reporter())
        .train(training_data.clone())?;

    println!();
    score("Training", &result.network, training_data)?;
    score("Test", &result.network, test_data)?;
    Ok(())
}

use neurons::algorithm::{Algorithm, Cost, Derivative};
use neurons::algorithms::{BackPropagation, LogisticCost, NumericalGradient};
use neurons::example::Example;
use neurons::feed_forward::Network;
use neurons::utils::round;

fn xnor_examples() -> Vec<Example> {
    vec![
        Example::new(vec![0.0, 0.0], vec![1.0]),
        Example::new(vec![0.0, 1.0], vec![0.0]),
        Example::new(vec![1.0, 0.0], vec![0.0]),
        Example::new(vec![1.0, 1.0], vec![1.0]),
    ]
}

fn main() -> neurons::Result<()> {
    let network = Network::from_json(
        r#"{
            "layers": [2, 2, 1],
            "weights": [
                [[-30, 20, 20], [10, -20, -20]],
                [[-10, 20, 20]]
            ]
        }"#,
    )?;

    for example in xnor_examples() {
        let output = network.run(&example.input)?;
        println!("{:?} -> {:?}", example.input, round(&output));
    }

    let mut cost = LogisticCost::new();
    cost.set_network(&network);
    cost.set_examples(xnor_examples().into());
    println!("logistic cost: {}", cost.run()?);

    // Compare the analytic gradient against its finite-difference estimate.
    let random = Network::new(&[2, 2, 1])?;
    let mut analytic = BackPropagation::new();
    analytic.set_network(&random);
    analytic.set_examples(xnor_examples().into());
    let mut numeric = NumericalGradient::new();
    numeric.set_network(&random);
    numeric.set_examples(xnor_examples().into());

    for (a, n) in analytic.run()?.iter().zip(&numeric.run()?) {
        let largest = (a - n).iter().fold(0.0f64, |max, d| max.max(d.abs()));
        println!("max gradient difference: {:e}", largest);
    }
    Ok(())
}

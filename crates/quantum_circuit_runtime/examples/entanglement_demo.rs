// =============================================================================
// Qubit Lens - Entanglement Demo
// =============================================================================
// Table of Contents:
//   1. Configuration
//   2. Bell pair construction and decomposition
//   3. Measurement statistics
//   4. Entanglement swapping
// =============================================================================
// Purpose: Walks a Bell pair and an entanglement swapping experiment through
//          embedding, composition, measurement and decomposition.
// =============================================================================

use quantum_circuit_runtime::prelude::*;

const CONFIGURATION_TEXT: &str = r#"
absolute_tolerance = 1e-10
relative_tolerance = 1e-9
display_precision = 4
measurement_seed = 2718
maximum_quantum_bits = 8
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // =========================================================================
    // 1. Configuration
    // =========================================================================
    let configuration = SimulatorConfiguration::from_toml_str(CONFIGURATION_TEXT)?;
    let precision = configuration.display_precision;
    println!("Step 1: configuration");
    println!("{}", configuration.to_toml_string()?);

    // =========================================================================
    // 2. Bell pair
    // =========================================================================
    println!("Step 2: Bell pair from H on qubit 0 then CNOT(0 -> 1)");
    let mut circuit = QuantumCircuitStructure::with_configuration(2, &configuration)?;
    circuit
        .apply_hadamard_gate(0)?
        .apply_controlled_not_gate(0, 1)?;
    println!("   Circuit ID: {}", circuit.id());
    println!("   Operations: {}", circuit.operation_names().join(", "));

    let operator = circuit.compose()?;
    println!("{}", render_matrix(&operator, precision));

    let bell_state = circuit.execute(&zero_state(2)?)?;
    println!("{}", render_state_vector_table(&bell_state, precision)?);
    println!("   Ket form: {}", state_vector_to_ket_string(&bell_state, precision)?);

    let terms = decompose_state_with_tolerance(&bell_state, &[0], None, configuration.tolerance())?;
    println!("   Terms across 0 | 1: {}", decomposed_terms_to_string(&terms, precision)?);
    println!("   Separable: {}", terms.len() == 1);
    println!();

    // =========================================================================
    // 3. Measurement statistics
    // =========================================================================
    println!("Step 3: measuring qubit 0 of the Bell pair");
    let projector = embed_gate_with_configuration(
        &measurement_projector_z_plus(),
        &QubitMap::single_target(2, 0),
        &configuration,
    )?;
    let mut engine = ProjectiveMeasurementEngine::new(&configuration);
    let statistics = engine.sample_statistics(&bell_state, &projector, 1000)?;
    println!("   Shots: {}", statistics.total_shots);
    println!(
        "   +1: {}  -1: {}  expected P(+1): {:.4}",
        statistics.plus_count, statistics.minus_count, statistics.expected_plus_probability
    );
    println!("   Entropy: {:.4} bits", statistics.entropy());

    let single = engine.measure(&bell_state, &projector)?;
    println!(
        "   One shot: outcome {:+} leaves {}",
        single.outcome.eigenvalue(),
        state_vector_to_ket_string(&single.post_measurement_state, precision)?
    );
    println!();

    // =========================================================================
    // 4. Entanglement swapping
    // =========================================================================
    println!("Step 4: entanglement swapping over qubits 0-1 and 2-3");
    let preparation = entanglement_swapping_preparation()?;
    let mut state = apply_operator(&preparation, &zero_state(4)?)?;
    let terms = decompose_state(&state, &[0, 3], None)?;
    println!("   Before measurement, (0,3) | (1,2): {} terms", terms.len());

    let z_plus = StandardGate::ProjectorZPlus.matrix();
    for qubit in [1, 2] {
        let projector = embed_gate(&z_plus, &QubitMap::single_target(4, qubit))?;
        let result = engine.measure(&state, &projector)?;
        println!(
            "   Qubit {qubit}: outcome {:+} with P(+1) = {:.4}",
            result.outcome.eigenvalue(),
            result.probability_plus
        );
        state = result.post_measurement_state;
    }

    println!("   After measurement: {}", state_vector_to_ket_string(&state, precision)?);
    let outer_pair = decompose_state(&state, &[0], Some(&[1, 2, 3]))?;
    println!("   Qubit 0 | rest: {}", decomposed_terms_to_string(&outer_pair, precision)?);
    println!("   Qubits 0 and 3 entangled: {}", outer_pair.len() > 1);

    Ok(())
}

/// worked examples: reference run, step size study, initiator sweep, strict vs permissive
pub mod polymerization_examples;

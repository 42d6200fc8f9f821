use hornlite::{parse_term, KnowledgeBase};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) tell facts + rules
    let mut kb = KnowledgeBase::new();
    for sentence in [
        "Parent(Tom,Bob)",
        "Parent(Bob,Ann)",
        "Parent(Ann,Joe)",
        "Parent(x,y) => Ancestor(x,y)",
        "Parent(x,z) ^ Ancestor(z,y) => Ancestor(x,y)",
    ] {
        kb.tell(sentence)?;
    }

    println!("Told {} facts and {} rules.", kb.fact_count(), kb.rule_count());

    // 2) yes/no questions
    for q in ["Ancestor(Tom,Joe)", "Ancestor(Joe,Tom)", "Sibling(Bob,Ann)"] {
        println!("{q}? {}", kb.ask(q)?);
    }

    // 3) enumerate bindings
    let goal = parse_term("Ancestor(Tom,who)")?;
    for sub in kb.solutions(&goal) {
        if let Some(who) = sub.resolve("who") {
            println!("Tom is an ancestor of {who}");
        }
    }

    Ok(())
}

//! The fixed advice instructions sent ahead of the statement payload.
//!
//! The wording (opening phrases, "top 3" vs "top 5", the carbon score rubric)
//! is part of the request contract and is sent unchanged.

pub const ADVICE_INSTRUCTIONS: &str = "scrape the bank statement and output: total income, total spending, and give the top 3 categories that contributed towards spending. DONT SHOW YOUR WORKING JUST GIVE THE RESULT ...start by saying 'from the provided statements, here are the results..ALWAYS SAY THIS. THEN BEFORE outputting the top 3 categories, say here are the top 5 categories ALWAYS SAY THIS. now..review the top 5 categories and give a score out of 100 on the carbon footprint that the top 5 categories contribute to. explain how each category contributes towards the footprint and the score it contributes towards the total. before you say that say 'here is your estimated carbon footprint score' then at the bottom give a 'Tips that will contribute towards less carbon footprint'";

/// Instructions followed by the payload JSON, embedded verbatim.
pub fn build_prompt(payload_json: &str) -> String {
    format!("{ADVICE_INSTRUCTIONS} : {payload_json}")
}

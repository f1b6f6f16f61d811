/// Wrap a budgeted browsing log in the digest instructions for `date`.
#[must_use]
pub fn build_digest_prompt(content: &str, date: &str) -> String {
    format!(
        "You are a personal assistant that creates concise daily browsing digests.

Below is a log of web pages I visited on {date}. Please create a 2-minute reading digest that:

1. **Main Themes**: What topics did I spend time on today? (2-3 bullet points)
2. **Key Insights**: What are the most important things I learned? (3-5 bullet points)
3. **Action Items**: Any tasks, ideas, or follow-ups worth noting? (if applicable)
4. **Time Analysis**: Brief observation about my browsing patterns

Keep it conversational and useful. Skip the fluff.

---
BROWSING LOG:
{content}
---

Now write my digest:"
    )
}

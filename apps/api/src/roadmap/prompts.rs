// All LLM prompt constants for roadmap generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for roadmap generation. Append `JSON_ONLY_INSTRUCTION`.
pub const ROADMAP_SYSTEM: &str = "You are a senior career mentor and industry expert. \
    You assess a learner's profile against their goal and design short, \
    high-impact learning plans with realistic resources.";

/// Roadmap prompt template.
/// Replace: {sector}, {goal}, {skills}, {certificates}, {level}, {study_hours}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Act as a senior career mentor and industry expert in {sector}.
Analyze the following student profile and generate a 4-week high-impact learning roadmap.

User Profile:
- Goal: {goal}
- Current Skills: {skills}
- Certificates: {certificates}
- Level: {level}
- Study time available: {study_hours} hours per day

Tasks:
1. Identify the skills missing between the current profile and the goal.
2. Provide a roadmap of exactly 4 entries, one per week, numbered 1 to 4. Size each week's tasks to the study time available.
3. For EACH week, suggest 2 realistic video courses (e.g. from Coursera, Udemy or YouTube) with title, platform and url.
4. Provide 2-3 specific project ideas to build a portfolio, and one headline project idea.
5. Calculate a readinessScore from 0 to 100 for how ready this person is for the goal today.
6. Calculate a baselineScore from 0 to 100 for a peer with the same goal who has not started preparing (typically 0-10).

Return a JSON object with this EXACT shape (no extra fields):
{
  "missingSkills": ["Python"],
  "recommendation": "One paragraph of advice",
  "roadmap": [
    {
      "week": 1,
      "topic": "Python for Data",
      "description": "What this week covers and why",
      "resources": ["Official tutorial"],
      "tasks": ["Load a CSV with pandas"],
      "suggestedCourses": [
        {"title": "Python for Everybody", "platform": "Coursera", "url": "https://...", "thumbnail": ""}
      ]
    }
  ],
  "projectIdea": "Headline portfolio project",
  "featuredProjects": [
    {"title": "Project", "difficulty": "Beginner", "description": "What to build"}
  ],
  "readinessScore": 30,
  "baselineScore": 5
}"#;

pub const NONE_LISTED: &str = "None listed";

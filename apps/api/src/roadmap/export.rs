use crate::models::analysis::SkillGapAnalysis;
use crate::models::profile::UserProfile;

/// Renders a profile and its roadmap as a printable markdown document.
pub fn render_roadmap_to_md(profile: &UserProfile, analysis: &SkillGapAnalysis) -> String {
    let mut md = format!("# {}'s Roadmap\n\n", profile.name);
    md.push_str(&format!("- **Sector:** {}\n", profile.sector));
    md.push_str(&format!("- **Goal:** {}\n", profile.goal));
    md.push_str(&format!("- **Level:** {}\n", profile.level));
    md.push_str(&format!(
        "- **Study time:** {}h/day\n",
        profile.study_hours_per_day
    ));
    if !profile.skills.is_empty() {
        md.push_str(&format!("- **Skills:** {}\n", profile.skills.join(", ")));
    }
    md.push('\n');

    md.push_str("## Readiness\n\n");
    md.push_str(&format!(
        "- **Your readiness:** {}%\n- **Unprepared baseline:** {}%\n- **Advantage:** {:+} points\n\n",
        analysis.readiness_score,
        analysis.baseline_score,
        analysis.advantage_over_baseline()
    ));

    md.push_str("## Recommendation\n\n");
    md.push_str(&format!("{}\n\n", analysis.recommendation));

    if !analysis.missing_skills.is_empty() {
        md.push_str("## Skill Gaps\n\n");
        for skill in &analysis.missing_skills {
            md.push_str(&format!("- {skill}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Learning Path\n\n");
    for step in &analysis.roadmap {
        md.push_str(&format!("### Week {}: {}\n\n", step.week, step.topic));
        md.push_str(&format!("{}\n\n", step.description));
        if !step.tasks.is_empty() {
            md.push_str("**Tasks**\n\n");
            for task in &step.tasks {
                md.push_str(&format!("- [ ] {task}\n"));
            }
            md.push('\n');
        }
        if !step.resources.is_empty() {
            md.push_str("**Resources**\n\n");
            for resource in &step.resources {
                md.push_str(&format!("- {resource}\n"));
            }
            md.push('\n');
        }
        if !step.suggested_courses.is_empty() {
            md.push_str("**Courses**\n\n");
            for course in &step.suggested_courses {
                if course.url.is_empty() {
                    md.push_str(&format!("- {} ({})\n", course.title, course.platform));
                } else {
                    md.push_str(&format!(
                        "- [{}]({}) ({})\n",
                        course.title, course.url, course.platform
                    ));
                }
            }
            md.push('\n');
        }
    }

    md.push_str("## Projects\n\n");
    md.push_str(&format!("**Capstone:** {}\n\n", analysis.project_idea));
    for project in &analysis.featured_projects {
        md.push_str(&format!(
            "- **{}** ({}): {}\n",
            project.title, project.difficulty, project.description
        ));
    }
    md
}

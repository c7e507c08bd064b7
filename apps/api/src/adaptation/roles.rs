use serde::Serialize;

/// A target role: `focus` is shown to users, `keywords` steer the rewrite prompt.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleProfile {
    pub name: &'static str,
    pub focus: &'static str,
    #[serde(skip)]
    pub keywords: &'static str,
}

pub static ROLES: [RoleProfile; 6] = [
    RoleProfile {
        name: "Frontend Developer",
        focus: "UI/UX, React, JavaScript, TypeScript, responsive design, modern frontend frameworks, state management, component architecture",
        keywords: "React, JavaScript, TypeScript, HTML, CSS, Tailwind, responsive, UI components, frontend optimization, browser compatibility",
    },
    RoleProfile {
        name: "Backend Developer",
        focus: "API development, databases, server architecture, scalability, microservices, authentication, data modeling",
        keywords: "Node.js, Express, PostgreSQL, MongoDB, REST API, microservices, authentication, backend optimization, database design",
    },
    RoleProfile {
        name: "Python Developer",
        focus: "Python frameworks, data processing, scripting, automation, API development, testing",
        keywords: "Python, Flask, Django, FastAPI, data processing, automation, testing, scripting, backend development",
    },
    RoleProfile {
        name: "Full Stack Developer",
        focus: "End-to-end development, both frontend and backend, database design, deployment, full application lifecycle",
        keywords: "Full stack, React, Node.js, databases, deployment, CI/CD, frontend, backend, end-to-end development",
    },
    RoleProfile {
        name: "DevOps Engineer",
        focus: "CI/CD, deployment, infrastructure, containers, orchestration, automation, monitoring",
        keywords: "DevOps, Docker, Kubernetes, CI/CD, deployment, automation, infrastructure, monitoring, cloud platforms",
    },
    RoleProfile {
        name: "Data Analyst",
        focus: "Data analysis, SQL, visualization, reporting, statistical analysis, business intelligence",
        keywords: "Data analysis, SQL, Python, visualization, reporting, analytics, business intelligence, data processing",
    },
];

/// Exact, case-sensitive match on the role name.
pub fn find_role(name: &str) -> Option<&'static RoleProfile> {
    ROLES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_role() {
        let role = find_role("DevOps Engineer").unwrap();
        assert!(role.keywords.contains("Kubernetes"));
        assert!(find_role("devops engineer").is_none());
        assert!(find_role("Astronaut").is_none());
    }

    #[test]
    fn test_role_names_are_unique() {
        for (i, a) in ROLES.iter().enumerate() {
            assert!(ROLES.iter().skip(i + 1).all(|b| b.name != a.name));
        }
    }
}

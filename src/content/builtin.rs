//! Records compiled into the binary, used when no `_content.yml` exists

use super::records::{
    BlogPost, ExperienceType, PageConfig, Pages, Project, ProjectDescription, Skill, SocialLink,
    SubPage,
};

pub(crate) fn blogs() -> Vec<BlogPost> {
    vec![
        BlogPost {
            tags: vec![
                "React".to_string(),
                "Gallery".to_string(),
                "Community".to_string(),
            ],
            ..BlogPost::new(
                "autogen-building-future",
                "AutoGen: Building the Future",
                "Improved the gallery component to showcase the community work. This involved \
                 restructuring the component architecture and implementing responsive design patterns.",
                "10/09/2025",
            )
        },
        BlogPost {
            tags: vec![
                "Open Source".to_string(),
                "Bug Fix".to_string(),
                "CSS".to_string(),
            ],
            ..BlogPost::new(
                "creative-commons-navbar-fix",
                "Creative Commons Navbar Fix",
                "Closed Issue: Fixed navbar issue on the main website of creative common.",
                "15/08/2025",
            )
        },
    ]
}

pub(crate) fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "nanopore-basecalling".to_string(),
            company_name: "Nanopore Basecalling".to_string(),
            short_description: "Neural basecaller for raw nanopore squiggle signals.".to_string(),
            start_date: "01/2025".to_string(),
            end_date: None,
            experience_type: ExperienceType::PersonalProject,
            category: vec![
                "Bioinformatics".to_string(),
                "Computational Bioengineering".to_string(),
            ],
            tech_stack: vec![
                "Python".to_string(),
                "Pytorch".to_string(),
                "Biopython".to_string(),
            ],
            logo_image: "/experience/nanopore/logo.png".to_string(),
            github_link: Some("https://github.com/aahmeddev".to_string()),
            website_link: None,
            description: ProjectDescription {
                paragraphs: vec![
                    "Trained a recurrent model that translates raw current traces into nucleotide \
                     sequences and compared it against reference basecallers."
                        .to_string(),
                ],
                bullets: vec![
                    "Signal normalisation and chunking pipeline".to_string(),
                    "CTC decoding with beam search".to_string(),
                    "Accuracy benchmarks against reference reads".to_string(),
                ],
            },
            pages_info_title: None,
            pages: vec![SubPage {
                title: "Training Pipeline".to_string(),
                description: "End-to-end training on simulated and real reads.".to_string(),
                images: vec!["/experience/nanopore/training.png".to_string()],
                link_url: None,
            }],
        },
        Project {
            id: "protein-stability-explorer".to_string(),
            company_name: "Protein Stability Explorer".to_string(),
            short_description: "Interactive viewer for predicted mutation stability effects."
                .to_string(),
            start_date: "06/2024".to_string(),
            end_date: Some("09/2024".to_string()),
            experience_type: ExperienceType::PersonalProject,
            category: vec!["Bioinformatics".to_string(), "Web Dev".to_string()],
            tech_stack: vec!["Python".to_string(), "Streamlit".to_string()],
            logo_image: "/experience/stability/logo.png".to_string(),
            github_link: Some("https://github.com/aahmeddev".to_string()),
            website_link: None,
            description: ProjectDescription {
                paragraphs: vec![
                    "A small web tool for exploring how point mutations change predicted \
                     folding free energy."
                        .to_string(),
                ],
                bullets: vec!["Structure upload and residue selection".to_string()],
            },
            pages_info_title: Some("Screens".to_string()),
            pages: vec![SubPage {
                title: "Mutation Scan".to_string(),
                description: "Heatmap of stability changes across all residues.".to_string(),
                images: vec!["/experience/stability/scan.png".to_string()],
                link_url: Some("https://github.com/aahmeddev".to_string()),
            }],
        },
    ]
}

pub(crate) fn skills() -> Vec<Skill> {
    let skill = |name: &str, description: &str, rating: u8, icon: &str| Skill {
        name: name.to_string(),
        description: description.to_string(),
        rating,
        icon: icon.to_string(),
    };

    vec![
        skill(
            "Python",
            "Versatile language for scripting, data analysis, and building bioinformatics pipelines.",
            5,
            "python",
        ),
        skill(
            "MATLAB",
            "High-level language and interactive environment for numerical computation, visualization, and programming.",
            5,
            "matlab",
        ),
        skill(
            "Java",
            "General-purpose, object-oriented language for building robust, large-scale applications.",
            5,
            "java",
        ),
        skill(
            "HTML5",
            "The standard markup language for creating the structure and content of web pages.",
            4,
            "html5",
        ),
        skill(
            "Git",
            "Essential version control system for tracking code changes and collaborating on software projects.",
            5,
            "git",
        ),
        skill(
            "Pytorch",
            "A popular open-source machine learning library for building and training neural networks.",
            4,
            "pytorch",
        ),
        skill(
            "ImageJ",
            "Open-source image processing program widely used for analyzing scientific and medical images.",
            5,
            "imagej",
        ),
        skill(
            "Biopython",
            "The go-to library and toolkit for computational molecular biology and bioinformatics in Python.",
            4,
            "python",
        ),
        skill(
            "C++",
            "A high-performance language used for systems programming, game development, and computational science.",
            4,
            "cpp",
        ),
    ]
}

pub(crate) fn socials() -> Vec<SocialLink> {
    vec![
        SocialLink {
            name: "Github".to_string(),
            username: "@aahmeddev".to_string(),
            icon: "gitHub".to_string(),
            link: "https://github.com/aahmeddev".to_string(),
        },
        SocialLink {
            name: "LinkedIn".to_string(),
            username: "Ahmed Ahmed".to_string(),
            icon: "linkedin".to_string(),
            link: "https://www.linkedin.com/in/ahmed-ahmed-37554021a/".to_string(),
        },
    ]
}

pub(crate) fn pages() -> Pages {
    Pages {
        home: PageConfig::new(
            "Home",
            "Welcome to my portfolio website.",
            "Ahmed Ahmed's portfolio website.",
        ),
        skills: PageConfig::new(
            "Skills",
            "Key skills that define my professional identity.",
            "Ahmed Ahmed's key skills.",
        ),
        projects: PageConfig::new(
            "Projects",
            "A showcase of my computational biology and software development projects.",
            "Ahmed Ahmed's projects in bioinformatics and molecular bioengineering.",
        ),
        contact: PageConfig::new(
            "Contact",
            "Let's connect and explore collaborations.",
            "Contact Ahmed Ahmed.",
        ),
        blog: PageConfig::new(
            "Blog",
            "Writings and thoughts on molecular bioengineering and technology.",
            "Ahmed Ahmed's blog on science and technology.",
        ),
        cv: PageConfig::new("CV", "Ahmed Ahmed's CV.", "Ahmed Ahmed's CV."),
    }
}

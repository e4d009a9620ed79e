// Built-in portfolio dataset. Patterns must already be lower-case.

use super::Topic;

pub const PORTFOLIO_OWNER: &str = "Aditya";

pub(super) fn topics() -> Vec<Topic> {
    vec![
        Topic::new(
            "yoga-ai",
            ["yoga", "pose", "posture", "correction", "computer vision", "fitness", "mediapipe"],
            [
                "The **Yoga AI** project is a flagship Computer Vision application. It uses MediaPipe and Python to detect 33+ body landmarks in real time, analyzes your Asanas and gives instant audio-visual feedback to correct your form.",
                "**Yoga AI** is like having a personal yoga instructor in your pocket! 🧘 It tracks your posture through the webcam with MediaPipe and tells you exactly how to fix your pose.",
                "Under the hood, **Yoga AI** runs pose estimation on every frame, compares joint angles against reference Asanas and flags deviations as you move.",
            ],
        ),
        Topic::new(
            "skills",
            ["skill", "stack", "technology", "tech", "python", "tensorflow", "pytorch", "react", "next.js", "frontend", "backend"],
            [
                "Aditya is a **Prompt Engineer** and **Data Science & AI/ML Aspirant** with exceptional prompting skills for coding! 🚀\n\n**Core Focus:** Generative AI, Computer Vision, Data Science.\n**Tech Stack:** Python, TensorFlow, PyTorch, MediaPipe, LangChain.\n**Web:** Next.js, React (for showcasing AI).",
                "His toolbox: **Python** for everything ML, **TensorFlow** and **PyTorch** for models, **OpenCV** and **MediaPipe** for vision, **LangChain** for LLM apps. This very site is built with **Next.js** and **Tailwind CSS**.",
                "He knows his way around the frontend, but his *primary passion* is **AI and Data Science**. Think RAG systems, computer vision pipelines and prompt-driven agents.",
            ],
        ),
        Topic::new(
            "contact",
            ["contact", "email", "reach", "hire", "job", "freelance", "linkedin"],
            [
                "You should definitely get in touch! You can email him at **iitianadityakumarsingh@gmail.com** or connect via LinkedIn. He's always open to exciting collaborations and opportunities.",
                "The fastest way to reach Aditya is **iitianadityakumarsingh@gmail.com**. There's also a contact form at the bottom of this page! ✉️",
            ],
        ),
        Topic::new(
            "about",
            ["about", "who", "bio", "background", "education", "study", "college", "degree", "iit"],
            [
                "Aditya is a Dual Degree student pursuing a BS in Data Science & AI at **IIT Guwahati** and a B.Tech in CSE (AI & ML) at **AKTU**. He combines academic rigor with practical engineering to build SOLID software.",
                "Two degrees at once: **Data Science at IIT Guwahati** and **B.Tech CSE at AKTU**. His goal is to become a Data Scientist and AI/ML Engineer by 2028.",
            ],
        ),
        Topic::new(
            "prompt-engineering",
            ["prompt", "engineer", "gpt", "llm", "generative", "rag", "agent"],
            [
                "Prompt Engineering is one of his superpowers. He treats prompts as code, designing complex chains-of-thought to get the best out of LLMs. He's built several **RAG systems** and **autonomous agents**.",
                "For Aditya a prompt is a program: versioned, tested and iterated. That mindset powers his **Generative AI** work, from retrieval-augmented chatbots to multi-step agents. ✨",
            ],
        ),
        Topic::new(
            "projects",
            ["project", "work", "portfolio", "built", "build", "demo"],
            [
                "Here are some highlights:\n1. **Yoga AI**: Real-time posture correction.\n2. **SustainifyAI**: Climate analytics platform.\n3. **Cash Flowcrew**: Automated financial intelligence.\n4. **Digital Kuthputhli**: Gesture-controlled digital puppetry.\n\nWhich one would you like to know more about?",
                "His portfolio spans computer vision (**Yoga AI**, **Digital Kuthputhli**), climate analytics (**SustainifyAI**) and fintech automation (**Cash Flowcrew**). Ask me about any of them!",
            ],
        ),
        Topic::new(
            "greeting",
            ["hello", "hey there", "greetings", "good morning", "good evening", "namaste"],
            [
                "Hello! 👋 I'm the AI Assistant for this portfolio. I've been trained on Aditya's resume and codebase. Ask me anything about his projects, skills, or experience!",
                "Hey there! 🤖 Curious about Aditya? Try asking about his **projects**, his **tech stack** or how to **contact** him.",
            ],
        ),
        Topic::new(
            "sustainify",
            ["sustainify", "climate", "analytics", "environment"],
            [
                "**SustainifyAI** bridges raw climate data with actionable governance. It helps regions predict environmental challenges and build resilience using AI models.",
                "**SustainifyAI** turns climate datasets into forecasts and dashboards that policy makers can actually act on. 🌍",
            ],
        ),
        Topic::new(
            "kuthputhli",
            ["kuthputhli", "puppet", "gesture"],
            [
                "**Digital Kuthputhli** is gesture-controlled digital puppetry: hand landmarks from the webcam drive a virtual puppet in real time, reviving a traditional Indian art form with computer vision.",
            ],
        ),
        Topic::new(
            "cash-flowcrew",
            ["cash flowcrew", "flowcrew", "finance", "financial", "fintech"],
            [
                "**Cash Flowcrew** automates financial intelligence: it ingests transactions, categorizes spending and surfaces cash-flow insights without spreadsheets.",
            ],
        ),
        Topic::new(
            "youtube",
            ["youtube", "channel", "video", "content", "subscriber"],
            [
                "Aditya runs the **BS IITIAN** YouTube channel (7K+ subscribers), creating educational content on AI, Data Science and tech. 🎥",
                "On **BS IITIAN** he teaches prompt engineering and Gen AI to thousands of learners. Check out the video gallery on this page!",
            ],
        ),
        Topic::new(
            "hobbies",
            ["fun", "hobby", "hobbies", "interest", "outside", "free time"],
            [
                "When not coding, Aditya loves exploring the intersection of art and tech (Generative Art), creating content for his YouTube channel, and practicing the very Yoga he builds apps for!",
            ],
        ),
    ]
}

pub(super) fn fallbacks() -> Vec<String> {
    vec![
        "That's a great question. While my database is focused on Aditya's professional profile, I can tell you he's a problem solver at heart. Ask me about his **Yoga AI** project!".into(),
        "I'm tuning my neural networks... 🧠 I don't have a specific answer for that, but I know Aditya loves tackling new challenges. Want to hear about his **Tech Stack**?".into(),
        "Interesting query! To keep things relevant to his work, try asking about his **Skills**, **Projects**, or **Education**.".into(),
    ]
}

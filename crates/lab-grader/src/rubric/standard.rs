use super::category::{Category, CategoryKind};
use super::check::{Check, Condition};
use super::task::TaskRubric;

pub(super) const TITLE: &str = "Study Buddy Lab — Grading Report";

const APP: &str = "app";
const COURSE_CARD: &str = "course_card";
const TASK_ITEM: &str = "task_item";
const DUE_BADGE: &str = "due_badge";

const COURSE_KEY: &str = r"key=\{?\s*course\.id\s*\}?";
const COURSE_PROP: &str = r"course=\{?course\}?";
const TERNARY: &str = r"\?\s*.*:\s*";

pub(super) fn task_rubrics() -> Vec<TaskRubric> {
    vec![
        render_courses(),
        render_tasks(),
        conditional_rendering(),
        interactivity(),
    ]
}

fn render_courses() -> TaskRubric {
    TaskRubric {
        key: "render_courses",
        name: "Task 1 — Render Course Components",
        completeness: Category::new(
            CategoryKind::Completeness,
            8,
            vec![
                Check::new(
                    "Maps over courses with .map(...)",
                    6,
                    Condition::matches(APP, r"\.map\s*\(\s*\(\s*course\s*,\s*idx?\s*\)\s*=>"),
                ),
                Check::new("Uses course.id as key", 2, Condition::matches(APP, COURSE_KEY)),
            ],
        ),
        correctness: Category::new(
            CategoryKind::Correctness,
            6,
            vec![
                Check::new(
                    "Renders <CourseCard /> for each course",
                    3,
                    Condition::matches(APP, r"<CourseCard[\s\S]*?>"),
                ),
                Check::new(
                    "Passes required props (course, index, onMutateCourse)",
                    3,
                    Condition::All(vec![
                        Condition::matches(APP, COURSE_PROP),
                        Condition::matches(APP, r"index=\{?idx\}?"),
                        Condition::matches(APP, r"onMutateCourse=\{?mutateCourseByIndex\}?"),
                    ]),
                ),
            ],
        ),
        quality: Category::new(
            CategoryKind::CodeQuality,
            6,
            vec![
                Check::new(
                    "Mapping code is readable and idiomatic JSX",
                    3,
                    Condition::matches(APP, r#"<section className="grid">[\s\S]*</section>"#),
                ),
                Check::new(
                    "Keys and props used consistently",
                    3,
                    Condition::All(vec![
                        Condition::matches(APP, COURSE_KEY),
                        Condition::matches(APP, COURSE_PROP),
                    ]),
                ),
            ],
        ),
    }
}

fn render_tasks() -> TaskRubric {
    TaskRubric {
        key: "render_tasks",
        name: "Task 2 — Render Tasks per Course",
        completeness: Category::new(
            CategoryKind::Completeness,
            8,
            vec![
                Check::new(
                    "Maps course.tasks with .map(...)",
                    6,
                    Condition::matches(COURSE_CARD, r"course\.tasks\.map\s*\("),
                ),
                Check::new(
                    "Uses task.id as key",
                    2,
                    Condition::matches(COURSE_CARD, r"key=\{?\s*task\.id\s*\}?"),
                ),
            ],
        ),
        correctness: Category::new(
            CategoryKind::Correctness,
            6,
            vec![
                Check::new(
                    "Renders <TaskItem /> per task",
                    3,
                    Condition::matches(COURSE_CARD, r"<TaskItem[\s\S]*?>"),
                ),
                Check::new(
                    "Passes task, onToggle, onDelete props",
                    3,
                    Condition::All(vec![
                        Condition::matches(COURSE_CARD, r"task=\{?task\}?"),
                        Condition::matches(COURSE_CARD, r"onToggle=\{?toggleTask\}?"),
                        Condition::matches(COURSE_CARD, r"onDelete=\{?deleteTask\}?"),
                    ]),
                ),
            ],
        ),
        quality: Category::new(
            CategoryKind::CodeQuality,
            6,
            vec![
                Check::new(
                    "Task list appears inside <ul className=\"tasks\">",
                    3,
                    Condition::matches(COURSE_CARD, r#"<ul\s+className="tasks">"#),
                ),
                Check::new(
                    "Clear, minimal list item structure",
                    3,
                    Condition::Any(vec![
                        Condition::matches(COURSE_CARD, r#"<li\b[^>]*className="task""#),
                        Condition::matches(TASK_ITEM, r#"className="task""#),
                    ]),
                ),
            ],
        ),
    }
}

fn conditional_rendering() -> TaskRubric {
    TaskRubric {
        key: "conditional_rendering",
        name: "Task 3 — Conditional Rendering",
        completeness: Category::new(
            CategoryKind::Completeness,
            8,
            vec![
                Check::new(
                    "Shows “All caught up” badge when all tasks are done (logical &&)",
                    3,
                    Condition::matches(COURSE_CARD, r#"(?i)&&\s*["'`]?All caught up!?["'`]?"#),
                ),
                Check::new(
                    "Shows empty state via ternary when no tasks",
                    3,
                    Condition::All(vec![
                        Condition::matches(
                            COURSE_CARD,
                            r"(?i)No tasks yet\.? Add your first one below\.",
                        ),
                        Condition::matches(COURSE_CARD, TERNARY),
                    ]),
                ),
                Check::new(
                    "TaskItem renders <DueBadge /> only when task is not done",
                    2,
                    Condition::matches(
                        TASK_ITEM,
                        r"\{\s*!\s*task\.isDone\s*&&\s*<DueBadge[\s\S]*?>\s*\}",
                    ),
                ),
            ],
        ),
        correctness: Category::new(
            CategoryKind::Correctness,
            6,
            vec![
                Check::new(
                    "DueBadge computes days with daysUntil(dueDate)",
                    2,
                    Condition::matches(DUE_BADGE, r"daysUntil\s*\(\s*dueDate\s*\)"),
                ),
                Check::new(
                    "Ternary chain labels (Overdue / Due today / 1 day remaining / N days remaining)",
                    2,
                    Condition::All(vec![
                        Condition::matches(DUE_BADGE, "Overdue"),
                        Condition::matches(DUE_BADGE, "Due today"),
                        Condition::matches(DUE_BADGE, "1 day remaining"),
                        Condition::matches(DUE_BADGE, "days remaining"),
                    ]),
                ),
                Check::new(
                    "Adds class 'danger' if overdue and 'warn' if due today",
                    2,
                    Condition::All(vec![
                        Condition::matches(DUE_BADGE, r#"\bbadge[^"'`}]*\bdanger\b"#),
                        Condition::matches(DUE_BADGE, r#"\bbadge[^"'`}]*\bwarn\b"#),
                    ]),
                ),
            ],
        ),
        quality: Category::new(
            CategoryKind::CodeQuality,
            6,
            vec![
                Check::new(
                    "Conditional expressions are concise and readable",
                    3,
                    Condition::All(vec![
                        Condition::matches(COURSE_CARD, TERNARY),
                        Condition::matches(TASK_ITEM, r"&&\s*<DueBadge"),
                    ]),
                ),
                Check::new(
                    "DueBadge returns a single, clean <span className=\"badge ...\">",
                    3,
                    Condition::matches(DUE_BADGE, r#"<span\s+className="badge"#),
                ),
            ],
        ),
    }
}

fn interactivity() -> TaskRubric {
    TaskRubric {
        key: "interactivity",
        name: "Task 4 — Interactivity (Add/Toggle/Delete)",
        completeness: Category::new(
            CategoryKind::Completeness,
            8,
            vec![
                Check::new(
                    "toggleTask(id) function exists",
                    2,
                    Condition::matches(COURSE_CARD, r"function\s+toggleTask\s*\(\s*id\s*\)"),
                ),
                Check::new(
                    "deleteTask(id) function exists",
                    2,
                    Condition::matches(COURSE_CARD, r"function\s+deleteTask\s*\(\s*id\s*\)"),
                ),
                Check::new(
                    "addTask(e) function exists",
                    2,
                    Condition::matches(COURSE_CARD, r"function\s+addTask\s*\(\s*e\s*\)"),
                ),
                Check::new(
                    "Uses onMutateCourse(index, updater) to modify tasks",
                    2,
                    Condition::matches(COURSE_CARD, r"onMutateCourse\s*\(\s*index\s*,"),
                ),
            ],
        ),
        correctness: Category::new(
            CategoryKind::Correctness,
            6,
            vec![
                Check::new(
                    "Toggle implemented with .map and flips isDone",
                    2,
                    Condition::matches(
                        COURSE_CARD,
                        r"\.map\s*\(\s*t\s*=>[\s\S]*isDone\s*:\s*!t\.isDone",
                    ),
                ),
                Check::new(
                    "Delete implemented with .filter(id)",
                    2,
                    Condition::matches(
                        COURSE_CARD,
                        r"\.filter\s*\(\s*t\s*=>\s*t\.id\s*!==\s*id\s*\)",
                    ),
                ),
                Check::new(
                    "Add creates { id, title, dueDate: date, isDone: false }",
                    2,
                    Condition::matches(
                        COURSE_CARD,
                        r"\{\s*id\s*,\s*title\s*,\s*dueDate:\s*date\s*,\s*isDone:\s*false\s*\}",
                    ),
                ),
            ],
        ),
        quality: Category::new(
            CategoryKind::CodeQuality,
            6,
            vec![
                Check::new(
                    "Resets input fields after add (setTitle(''); setDate(''))",
                    3,
                    Condition::matches(
                        COURSE_CARD,
                        r#"setTitle\s*\(\s*['"`]\s*['"`]\s*\)\s*;?[\s\S]*setDate\s*\(\s*['"`]\s*['"`]\s*\)"#,
                    ),
                ),
                Check::new(
                    "TaskItem checkbox calls onToggle(task.id) and Delete calls onDelete(task.id)",
                    3,
                    Condition::All(vec![
                        Condition::matches(
                            TASK_ITEM,
                            r#"type=['"]checkbox['"][^>]*onChange=\{\s*\(\)\s*=>\s*onToggle\s*\(\s*task\.id\s*\)\s*\}"#,
                        ),
                        Condition::matches(
                            TASK_ITEM,
                            r"onClick=\{\s*\(\)\s*=>\s*onDelete\s*\(\s*task\.id\s*\)\s*\}",
                        ),
                    ]),
                ),
            ],
        ),
    }
}

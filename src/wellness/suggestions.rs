use rand::seq::SliceRandom;
use rand::Rng;

use super::mood::MoodCategory;

const POSITIVE: &[&str] = &[
    "You're carrying some lovely energy right now. Pause for a moment and really savor it before the day moves on.",
    "That upbeat mood is worth keeping. Jot down three things you're thankful for so you can come back to them later.",
    "Good days are the perfect time to tackle something you've been putting off. Ride the momentum while it's here.",
    "Share a little of this brightness: send a kind message to someone who would enjoy hearing from you.",
    "You've earned a small treat today. Pick something you've been looking forward to and enjoy it without guilt.",
    "Gratitude like yours is a strength. Take a slow breath and notice how it feels to be exactly where you are.",
];

const STRESSED: &[&str] = &[
    "You're handling a lot, and you've come through hard stretches before. Try 4-7-8 breathing: in for 4, hold for 7, out for 8.",
    "Feeling overwhelmed just means you care. Break the biggest task into the smallest next step and do only that.",
    "Step outside for five minutes or put on something calm. A short break now will make the rest of the list lighter.",
    "Try progressive muscle relaxation: tense each muscle group for a few seconds, then let it go, from feet to shoulders.",
    "Write down your top three priorities and park everything else. Tackling them one at a time is enough for today.",
    "You don't have to do everything at once or do it perfectly. A short walk and some fresh air can reset a busy mind.",
];

const ANXIOUS: &[&str] = &[
    "What you're feeling is valid, and right now you are safe. Try 5-4-3-2-1: five things you see, four you can touch, three you hear, two you smell, one you taste.",
    "Place a hand on your chest and feel your heartbeat, steady and strong. Slow your exhale until it is longer than your inhale.",
    "Anxious thoughts feel urgent, but they are thoughts, not facts. Bring your attention back to this one moment.",
    "Give your worries a scheduled window later today, ten minutes, and let them wait until then.",
    "Write the what-ifs down on paper. Getting them out of your head takes away some of their weight.",
    "Anxiety passes through like weather. Speak to yourself the way you would speak to a close friend right now.",
];

const SAD: &[&str] = &[
    "It's okay to feel sad without fixing it right away. Let the feeling be here and treat yourself gently.",
    "Make yourself something warm to drink or take a hot shower. Small comforts count on heavy days.",
    "Getting through a hard day is an achievement. Consider reaching out to someone who cares about you.",
    "When you're ready, try a little gentle movement: a stretch or a slow walk around the block.",
    "This feeling is a visitor, not a permanent resident. What's one small kindness you can offer yourself today?",
    "A tender heart hurts sometimes because it loves deeply. Be patient with yourself while this shifts.",
];

const TIRED: &[&str] = &[
    "Your body is asking for rest. Even ten to twenty minutes lying down with your eyes closed can help.",
    "Running low is a sign you've been giving a lot. Drink some water and eat something nourishing.",
    "Try a few minutes of gentle stretching and slow, deep breaths to wake up without pushing.",
    "Tiredness isn't weakness. Ask what would recharge you most right now: rest, fresh air, or a quiet break.",
    "Sometimes the most productive thing you can do is rest. Give yourself permission to slow down today.",
    "Notice what drains you and what restores you, and lean toward the restoring things for the rest of the day.",
];

const FRUSTRATED: &[&str] = &[
    "That frustration makes sense. Take a few deep breaths, then ask yourself what you actually need right now.",
    "Channel the energy into movement: a brisk walk or some vigorous tidying can burn it off.",
    "Try STOP: Stop, Take a breath, Observe what's happening, then Proceed with a clearer head.",
    "It's okay to be angry. Write it all out on paper, unfiltered, and then decide what to keep.",
    "Find one small thing that is within your control right now and start there.",
    "Some days really are uphill. Acknowledge the frustration, then pick one thing that would make you feel a bit better.",
];

const NEUTRAL: &[&str] = &[
    "Thanks for checking in with yourself. Take a slow, deep breath and simply notice how you feel.",
    "Whatever you're feeling right now matters. Do one small, kind thing for yourself today.",
    "Check in with yourself a few more times today and notice how your mood shifts.",
    "You don't have to fix or change anything. Just acknowledging what's here is a good practice.",
    "Ask yourself what you need most right now, and listen to the first honest answer.",
    "Be patient with yourself today. Small, steady care adds up over time.",
];

/// Category-independent pool used when suggestions are not mood-matched.
pub const GENERAL_SUGGESTIONS: &[&str] = &[
    "Take five deep breaths and stretch for two minutes to release tension.",
    "Step outside for a short walk and notice three things you find beautiful.",
    "Try 4-7-8 breathing: in for 4, hold for 7, out for 8.",
    "Write down three things you're grateful for today.",
    "Put on a favorite song and move your body for three minutes.",
    "Drink a glass of water slowly, paying attention to each sip.",
    "Close your eyes and picture a peaceful place for two minutes.",
    "Send a quick hello to someone you care about.",
    "Do some gentle neck and shoulder rolls.",
    "Write down one thing you got done today, however small.",
];

/// Fixed text used when a suggestion source fails.
pub const FALLBACK_SUGGESTION: &str =
    "Take three deep breaths and remember that this feeling is temporary. You are stronger than you know.";

pub fn suggestion_pool(category: MoodCategory) -> &'static [&'static str] {
    match category {
        MoodCategory::Positive => POSITIVE,
        MoodCategory::Stressed => STRESSED,
        MoodCategory::Anxious => ANXIOUS,
        MoodCategory::Sad => SAD,
        MoodCategory::Tired => TIRED,
        MoodCategory::Frustrated => FRUSTRATED,
        MoodCategory::Neutral => NEUTRAL,
    }
}

/// Uniform draw from the category's pool. Draws are independent.
pub fn pick_suggestion<R: Rng + ?Sized>(category: MoodCategory, rng: &mut R) -> &'static str {
    suggestion_pool(category)
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_SUGGESTION)
}

pub fn pick_general<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GENERAL_SUGGESTIONS
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_SUGGESTION)
}

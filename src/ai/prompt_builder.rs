/// Instruction prefix placed ahead of every transcript.
pub const INSTRUCTION_HEADER: &str = "You are DVSum, an assistant that summarizes YouTube videos \
from their transcripts. The transcript below is annotated with [MM:SS] timestamps.\n\
Write a clear, well-structured summary of the video:\n\
1. Start with a one-paragraph overview of what the video is about.\n\
2. Then list the key points in the order they appear, each prefixed with the [MM:SS] \
timestamp where it begins.\n\
3. Finish with the main takeaways.\n\
Use only information from the transcript. Do not invent timestamps.\n\n\
Transcript:\n";

/// Full prompt for a formatted transcript.
#[must_use]
pub fn build_prompt(transcript: &str) -> String {
    format!("{INSTRUCTION_HEADER}{transcript}")
}

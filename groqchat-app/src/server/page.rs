//! The single-page chat UI.

/// Prompts offered as one-click examples.
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "Hello! What can you do?",
    "Write a short poem",
    "Explain machine learning",
];

/// HTML served at `/`.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Multimodal AI Chatbot</title>
<style>
  body { font-family: Arial, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1.5rem; color: #222; }
  .row { display: flex; gap: 1.5rem; flex-wrap: wrap; }
  .col { flex: 1 1 420px; display: flex; flex-direction: column; gap: .75rem; }
  label { font-weight: bold; font-size: .9rem; }
  textarea, input[type=file] { width: 100%; box-sizing: border-box; }
  textarea { font: inherit; padding: .5rem; }
  button { border: none; border-radius: 6px; padding: .7rem 1rem; font-weight: bold; cursor: pointer; }
  button.primary { background: linear-gradient(45deg, #FF6B6B, #4ECDC4); color: #fff; }
  button.primary:disabled { opacity: .6; cursor: wait; }
  button.secondary { background: #e5e7eb; }
  .examples button { background: #f3f4f6; font-weight: normal; margin: 0 .4rem .4rem 0; }
  #preview { max-height: 200px; max-width: 100%; display: none; }
</style>
</head>
<body>
<h1>Multimodal AI Chatbot with Groq</h1>
<p><strong>Welcome to Multimodal AI Chatbot!</strong> Enter text, upload an image,
record or upload an audio file, or do it all at once.</p>

<form id="chat-form" class="row">
  <div class="col">
    <h3>Your input</h3>
    <label for="text">Enter a question or content</label>
    <textarea id="text" name="text" rows="3" placeholder="For example: Explain the picture..."></textarea>

    <label for="image">Upload image (optional)</label>
    <input id="image" name="image" type="file" accept="image/png,image/jpeg,image/gif,image/webp">
    <img id="preview" alt="preview">

    <label for="audio">Record or upload audio file (optional)</label>
    <input id="audio" name="audio" type="file" accept="audio/*" capture>

    <button id="send" class="primary" type="submit">Send request</button>
    <button id="clear" class="secondary" type="button">Delete all</button>
  </div>

  <div class="col">
    <h3>AI respond</h3>
    <label for="answer">Answer</label>
    <textarea id="answer" rows="15" readonly></textarea>
    <label for="status">Status</label>
    <textarea id="status" rows="2" readonly></textarea>
  </div>
</form>

<h3>How to use</h3>
<div class="examples">
  <button type="button" data-example>Hello! What can you do?</button>
  <button type="button" data-example>Write a short poem</button>
  <button type="button" data-example>Explain machine learning</button>
</div>

<script>
const form = document.getElementById("chat-form");
const text = document.getElementById("text");
const image = document.getElementById("image");
const audio = document.getElementById("audio");
const preview = document.getElementById("preview");
const answer = document.getElementById("answer");
const statusBox = document.getElementById("status");
const send = document.getElementById("send");

function progress() {
  let s = "Processing";
  if (text.value) s += " • Text ✓";
  if (image.files.length) s += " • Picture ✓";
  if (audio.files.length) s += " • Audio ✓";
  return s;
}

image.addEventListener("change", () => {
  if (image.files.length) {
    preview.src = URL.createObjectURL(image.files[0]);
    preview.style.display = "block";
  } else {
    preview.style.display = "none";
  }
});

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  statusBox.value = progress();
  send.disabled = true;
  try {
    const res = await fetch("/api/chat", { method: "POST", body: new FormData(form) });
    const body = await res.json();
    if (res.ok) {
      answer.value = body.response;
      statusBox.value = body.status;
    } else {
      answer.value = "Sorry, an error occurred: " + body.error;
      statusBox.value = "Error: " + body.error;
    }
  } catch (err) {
    answer.value = "Sorry, an error occurred: " + err;
    statusBox.value = "Error: " + err;
  } finally {
    send.disabled = false;
  }
});

document.getElementById("clear").addEventListener("click", () => {
  form.reset();
  preview.style.display = "none";
  answer.value = "";
  statusBox.value = "Deleted all";
});

document.querySelectorAll("[data-example]").forEach((button) => {
  button.addEventListener("click", () => {
    text.value = button.textContent;
    text.focus();
  });
});
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_title_and_controls() {
        assert!(INDEX_HTML.contains("<title>Multimodal AI Chatbot</title>"));
        assert!(INDEX_HTML.contains("Send request"));
        assert!(INDEX_HTML.contains("Delete all"));
        assert!(INDEX_HTML.contains("Deleted all"));
        assert!(INDEX_HTML.contains(r#"name="image""#));
        assert!(INDEX_HTML.contains(r#"name="audio""#));
    }

    #[test]
    fn page_lists_every_example() {
        for example in EXAMPLE_PROMPTS {
            assert!(INDEX_HTML.contains(example), "missing example {example}");
        }
    }
}

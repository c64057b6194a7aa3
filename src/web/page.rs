// Single-page form served at `/`

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Audio/Video Cut Application</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; }
  input[type=text], input[type=url] { width: 100%; padding: 0.4rem; }
  button { margin-top: 1.5rem; padding: 0.5rem 1.5rem; }
  #status { margin-top: 1.5rem; white-space: pre-wrap; }
  #status.error { color: #b00020; }
</style>
</head>
<body>
<h1>Audio/Video Cut Application</h1>
<p>Upload an mp3 or mp4 file, or give a URL to one. Times are minutes
(<code>1.5</code>), minutes:seconds (<code>1:30</code>) or
hours:minutes:seconds (<code>1:30:45</code>).</p>
<form id="cut-form">
  <label>File <input type="file" name="file" accept=".mp3,.mp4"></label>
  <label>or URL <input type="url" name="url" placeholder="https://example.com/clip.mp4"></label>
  <label>Start <input type="text" name="start" value="0" required></label>
  <label>End <input type="text" name="end" placeholder="2:30"></label>
  <label><input type="checkbox" name="use_end"> Cut to the end of the file</label>
  <button type="submit">Cut</button>
</form>
<div id="status"></div>
<script>
const form = document.getElementById("cut-form");
const status = document.getElementById("status");

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  status.className = "";
  status.textContent = "Processing...";

  try {
    const response = await fetch("/cut", { method: "POST", body: new FormData(form) });
    if (!response.ok) {
      status.className = "error";
      status.textContent = await response.text();
      return;
    }

    const disposition = response.headers.get("Content-Disposition") || "";
    const match = /filename="([^"]+)"/.exec(disposition);
    const name = match ? match[1] : "cut";
    const blob = await response.blob();
    const link = document.createElement("a");
    link.href = URL.createObjectURL(blob);
    link.download = name;
    link.textContent = "Download " + name;
    status.textContent = "";
    status.appendChild(link);
    link.click();
  } catch (err) {
    status.className = "error";
    status.textContent = String(err);
  }
});
</script>
</body>
</html>
"#;
